use serde::Deserialize;
use serde_json::Value;

use crate::mcp::error::McpError;
use crate::mcp::helpers::decode_args;

#[derive(Debug, Deserialize)]
struct EchoArgs {
    #[serde(default)]
    message: Option<String>,
}

/// Echo the message back, an absent message echoes as empty
pub(crate) fn handle(args: &Value) -> Result<String, McpError> {
    let args: EchoArgs = decode_args(args)?;
    Ok(format!("Tool echo: {}", args.message.unwrap_or_default()))
}
