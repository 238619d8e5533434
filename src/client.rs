//! HTTP client for an MCP server speaking JSON-RPC over `POST`.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::time::Duration;

const USER_AGENT: &str = "MCP-Client/1.0";

/// Body of `GET /`
#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub tools: u64,
    #[serde(default)]
    pub resources: u64,
}

/// Result of `initialize`
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeInfo {
    #[serde(rename = "protocolVersion", default = "unknown")]
    pub protocol_version: String,
    #[serde(rename = "serverInfo", default)]
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default = "unknown")]
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: unknown(),
            version: unknown(),
        }
    }
}

/// Tool descriptor as advertised by `tools/list`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Value,
}

impl ToolInfo {
    /// Declared parameters in schema order: (name, type, required)
    pub fn parameters(&self) -> Vec<ToolParameter> {
        let required: Vec<&str> = self
            .input_schema
            .get("required")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        self.input_schema
            .get("properties")
            .and_then(|v| v.as_object())
            .map(|props| {
                props
                    .iter()
                    .map(|(name, info)| ToolParameter {
                        name: name.clone(),
                        kind: info
                            .get("type")
                            .and_then(|v| v.as_str())
                            .unwrap_or("unknown")
                            .to_string(),
                        required: required.contains(&name.as_str()),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParameter {
    pub name: String,
    pub kind: String,
    pub required: bool,
}

/// Resource descriptor as advertised by `resources/list`
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceInfo {
    pub uri: String,
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "mimeType", default = "unknown")]
    pub mime_type: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Client for connecting to MCP servers
pub struct McpClient {
    server_url: String,
    http: reqwest::Client,
}

impl McpClient {
    pub fn new(server_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            server_url: server_url.to_string(),
            http,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Send a request to the MCP server.
    ///
    /// Transport and decode failures come back as `{"error": "..."}` so callers
    /// handle them the same way as a JSON-RPC error.
    pub async fn send_request(&self, method: &str, params: Option<Value>, request_id: u64) -> Value {
        let payload = build_payload(method, params, request_id);
        tracing::debug!(%method, request_id, "sending request");

        let response = match self
            .http
            .post(&self.server_url)
            .json(&payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
        {
            Ok(r) => r,
            Err(e) => return json!({ "error": format!("Request failed: {}", e) }),
        };

        match response.json::<Value>().await {
            Ok(body) => {
                tracing::debug!(%body, "received response");
                body
            }
            Err(e) if e.is_decode() => json!({ "error": format!("Invalid JSON response: {}", e) }),
            Err(e) => json!({ "error": format!("Request failed: {}", e) }),
        }
    }

    /// Test basic connection to the server
    pub async fn status(&self) -> Result<ServerStatus> {
        let response = self
            .http
            .get(&self.server_url)
            .send()
            .await
            .with_context(|| format!("Connection to {} failed", self.server_url))?;

        if !response.status().is_success() {
            bail!("Server returned status: {}", response.status());
        }

        response
            .json::<ServerStatus>()
            .await
            .context("Server status is not valid JSON")
    }

    /// Initialize the MCP connection
    pub async fn initialize(&self) -> Result<InitializeInfo> {
        let result = self.call("initialize", None).await?;
        serde_json::from_value(result).context("Malformed initialize result")
    }

    /// Get list of available tools
    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let result = self.call("tools/list", None).await?;
        let tools = result.get("tools").cloned().unwrap_or(json!([]));
        serde_json::from_value(tools).context("Malformed tools/list result")
    }

    /// Call a specific tool, returning its first text content
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<String> {
        let result = self
            .call(
                "tools/call",
                Some(json!({ "name": name, "arguments": arguments })),
            )
            .await?;
        Ok(first_text(&result))
    }

    /// Get list of available resources
    pub async fn list_resources(&self) -> Result<Vec<ResourceInfo>> {
        let result = self.call("resources/list", None).await?;
        let resources = result.get("resources").cloned().unwrap_or(json!([]));
        serde_json::from_value(resources).context("Malformed resources/list result")
    }

    /// Read a resource, returning the text of its JSON content
    pub async fn read_resource(&self, uri: &str) -> Result<String> {
        let result = self
            .call("resources/read", Some(json!({ "uri": uri })))
            .await?;
        Ok(json_contents(&result))
    }

    async fn call(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let response = self.send_request(method, params, 1).await;
        into_result(response)
    }
}

/// Build the JSON-RPC request body; empty params are left out.
pub fn build_payload(method: &str, params: Option<Value>, request_id: u64) -> Value {
    let mut payload = json!({
        "jsonrpc": "2.0",
        "id": request_id,
        "method": method,
    });

    let has_params = match &params {
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Null) | None => false,
        Some(_) => true,
    };
    if let (true, Some(params)) = (has_params, params) {
        payload["params"] = params;
    }

    payload
}

/// Split a response into its `result`, or an error describing its `error`
pub fn into_result(response: Value) -> Result<Value> {
    if let Some(error) = response.get("error") {
        match error {
            Value::Object(obj) => {
                let message = obj.get("message").and_then(|m| m.as_str()).unwrap_or("unknown error");
                match obj.get("code") {
                    Some(code) => bail!("{} (code {})", message, code),
                    None => bail!("{}", message),
                }
            }
            Value::String(s) => bail!("{}", s),
            other => bail!("{}", other),
        }
    }

    Ok(response.get("result").cloned().unwrap_or(json!({})))
}

/// First `text` item of a tool result, or the raw result when there is none
pub fn first_text(result: &Value) -> String {
    result
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|items| {
            items
                .iter()
                .find(|item| item.get("type").and_then(|t| t.as_str()) == Some("text"))
        })
        .and_then(|item| item.get("text").and_then(|t| t.as_str()))
        .map(String::from)
        .unwrap_or_else(|| result.to_string())
}

/// Text of the first `application/json` item of a resource read, empty when absent
pub fn json_contents(result: &Value) -> String {
    result
        .get("contents")
        .and_then(|c| c.as_array())
        .and_then(|items| {
            items.iter().find(|item| {
                item.get("mimeType").and_then(|m| m.as_str()) == Some("application/json")
            })
        })
        .and_then(|item| item.get("text").and_then(|t| t.as_str()))
        .unwrap_or_default()
        .to_string()
}
