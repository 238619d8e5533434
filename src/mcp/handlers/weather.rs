use serde::Deserialize;
use serde_json::Value;

use crate::mcp::error::McpError;
use crate::mcp::helpers::decode_args;

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    #[serde(default)]
    location: Option<String>,
}

/// Mock forecast: every location is sunny.
pub(crate) fn handle(args: &Value) -> Result<String, McpError> {
    let args: WeatherArgs = decode_args(args)?;
    Ok(format!(
        "The weather in {} is sunny and 72°F",
        args.location.unwrap_or_default()
    ))
}
