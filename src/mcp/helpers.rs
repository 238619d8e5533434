use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use super::error::McpError;

/// Decode a tool's `arguments` object into its typed parameter struct.
///
/// Missing or null `arguments` decode as `{}`.
pub(crate) fn decode_args<T: DeserializeOwned>(args: &Value) -> Result<T, McpError> {
    let args = if args.is_null() { json!({}) } else { args.clone() };
    serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))
}

/// Render an identifier field (tool name, resource uri) as text.
///
/// Anything but a string is rendered as JSON, a missing field as `null`, so
/// every value reaches the "not found" path.
pub(crate) fn identifier_field(params: &Map<String, Value>, field: &str) -> String {
    match params.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default)]
        value: Option<String>,
    }

    #[test]
    fn test_decode_args_null_is_empty_object() {
        let sample: Sample = decode_args(&Value::Null).unwrap();
        assert!(sample.value.is_none());
    }

    #[test]
    fn test_decode_args_wrong_type_is_invalid_params() {
        let err = decode_args::<Sample>(&json!({"value": 3})).unwrap_err();
        assert!(matches!(err, McpError::InvalidParams(_)));
    }

    #[test]
    fn test_identifier_field() {
        let params = json!({"name": "echo", "n": 7, "nothing": null});
        let params = params.as_object().unwrap();
        assert_eq!(identifier_field(params, "name"), "echo");
        assert_eq!(identifier_field(params, "n"), "7");
        assert_eq!(identifier_field(params, "nothing"), "null");
        assert_eq!(identifier_field(params, "missing"), "null");
    }
}
