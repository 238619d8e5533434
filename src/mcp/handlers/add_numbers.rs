use serde::Deserialize;
use serde_json::{Number, Value};

use crate::mcp::error::McpError;
use crate::mcp::helpers::decode_args;

/// Operands default to 0; anything other than a JSON number is rejected during decode.
#[derive(Debug, Deserialize)]
struct AddNumbersArgs {
    #[serde(default)]
    a: Option<Number>,
    #[serde(default)]
    b: Option<Number>,
}

/// Add `a` and `b`, returning the sum as text
pub(crate) fn handle(args: &Value) -> Result<String, McpError> {
    let args: AddNumbersArgs = decode_args(args)?;
    let zero = Number::from(0);
    Ok(sum(
        args.a.as_ref().unwrap_or(&zero),
        args.b.as_ref().unwrap_or(&zero),
    ))
}

fn sum(a: &Number, b: &Number) -> String {
    if let (Some(a), Some(b)) = (as_integer(a), as_integer(b)) {
        return (a + b).to_string();
    }

    let total = a.as_f64().unwrap_or_default() + b.as_f64().unwrap_or_default();
    format_float(total)
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// Render a float sum: whole values keep a `.0` (`1.5 + 2.5` reads `4.0`), and
/// magnitudes of 1e16 and above or below 1e-4 switch to exponent form (`1e+16`).
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        return exponent_form(value);
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// `1e16` becomes `1e+16`, `1.5e-5` becomes `1.5e-05`
fn exponent_form(value: f64) -> String {
    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_integers() {
        assert_eq!(handle(&json!({"a": 15, "b": 25})).unwrap(), "40");
        assert_eq!(handle(&json!({"a": -7, "b": 2})).unwrap(), "-5");
    }

    #[test]
    fn test_missing_operands_default_to_zero() {
        assert_eq!(handle(&json!({"b": 25})).unwrap(), "25");
        assert_eq!(handle(&json!({})).unwrap(), "0");
        assert_eq!(handle(&json!({"a": null, "b": 3})).unwrap(), "3");
    }

    #[test]
    fn test_add_floats() {
        assert_eq!(handle(&json!({"a": 1.5, "b": 2.5})).unwrap(), "4.0");
        assert_eq!(handle(&json!({"a": 0.25, "b": 1})).unwrap(), "1.25");
    }

    #[test]
    fn test_float_sums_in_exponent_range() {
        assert_eq!(handle(&json!({"a": 1e16, "b": 0.0})).unwrap(), "1e+16");
        assert_eq!(handle(&json!({"a": 1.5e20, "b": 0})).unwrap(), "1.5e+20");
        assert_eq!(handle(&json!({"a": 0.00001, "b": 0})).unwrap(), "1e-05");
        assert_eq!(handle(&json!({"a": 9999.5, "b": 0.5})).unwrap(), "10000.0");
        assert_eq!(handle(&json!({"a": -0.5, "b": 0.5})).unwrap(), "0.0");
    }

    #[test]
    fn test_large_integers_do_not_overflow() {
        let result = handle(&json!({"a": i64::MAX, "b": 1})).unwrap();
        assert_eq!(result, "9223372036854775808");
        let result = handle(&json!({"a": u64::MAX, "b": 1})).unwrap();
        assert_eq!(result, "18446744073709551616");
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        assert!(matches!(
            handle(&json!({"a": "15", "b": 25})),
            Err(McpError::InvalidParams(_))
        ));
        assert!(matches!(
            handle(&json!({"a": true, "b": 25})),
            Err(McpError::InvalidParams(_))
        ));
    }
}
