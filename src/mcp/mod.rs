pub(crate) mod clock;
pub(crate) mod error;
pub(crate) mod handlers;
pub(crate) mod helpers;
pub(crate) mod protocol;
pub(crate) mod resources;
pub(crate) mod tools;

use std::sync::Arc;

use error::McpError;
use helpers::identifier_field;
use protocol::{JsonRpcRequest, JsonRpcResponse, Resource, TextContent, Tool};
use resources::ResourceUri;
use serde_json::{Map, Value, json};
use tools::ToolName;

pub(crate) const SERVER_NAME: &str = "Vercel MCP Server";
pub(crate) const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const PROTOCOL_VERSION: &str = "2024-11-05";

/// Methods the server answers. Anything else is "method not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Initialize,
    ToolsList,
    ToolsCall,
    ResourcesList,
    ResourcesRead,
}

impl Method {
    pub fn parse(method: &str) -> Option<Self> {
        match method {
            "initialize" => Some(Method::Initialize),
            "tools/list" => Some(Method::ToolsList),
            "tools/call" => Some(Method::ToolsCall),
            "resources/list" => Some(Method::ResourcesList),
            "resources/read" => Some(Method::ResourcesRead),
            _ => None,
        }
    }
}

/// Tool and resource descriptors, fixed at construction
#[derive(Debug, Clone)]
pub(crate) struct Registry {
    pub tools: Vec<Tool>,
    pub resources: Vec<Resource>,
}

impl Registry {
    pub fn builtin() -> Self {
        Self {
            tools: tools::tool_definitions(),
            resources: resources::resource_definitions(),
        }
    }
}

/// MCP Server implementation
///
/// Holds no per-request state; one instance is shared across all requests.
pub(crate) struct McpServer {
    registry: Registry,
    clock: Arc<dyn clock::Clock>,
    echo_error_id: bool,
}

impl McpServer {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(clock::SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn clock::Clock>) -> Self {
        Self {
            registry: Registry::builtin(),
            clock,
            echo_error_id: false,
        }
    }

    /// Echo the request id on error responses as well (strict JSON-RPC 2.0).
    pub fn echo_error_id(mut self, enabled: bool) -> Self {
        self.echo_error_id = enabled;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handle an incoming JSON-RPC request that has already been parsed as JSON
    pub fn handle(&self, request: Value) -> JsonRpcResponse {
        if !request.is_object() {
            tracing::warn!("request is not a JSON object");
            return self.error_response(
                None,
                McpError::Internal("request must be a JSON object".to_string()),
            );
        }

        match serde_json::from_value::<JsonRpcRequest>(request) {
            Ok(request) => self.handle_request(&request),
            Err(e) => {
                tracing::warn!(error = %e, "malformed JSON-RPC request");
                self.error_response(None, McpError::Internal(e.to_string()))
            }
        }
    }

    /// Handle incoming JSON-RPC request
    pub fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone().unwrap_or(Value::Null);
        let method = request.method_name();
        tracing::debug!(%method, %id, "dispatching request");

        let params = request.params_object();
        let result = match Method::parse(&method) {
            Some(Method::Initialize) => Ok(self.handle_initialize()),
            Some(Method::ToolsList) => Ok(json!({ "tools": self.registry.tools })),
            Some(Method::ToolsCall) => self.handle_tools_call(&params),
            Some(Method::ResourcesList) => Ok(json!({ "resources": self.registry.resources })),
            Some(Method::ResourcesRead) => self.handle_resources_read(&params),
            None => Err(McpError::MethodNotFound(method)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => {
                tracing::warn!(code = error.code(), %error, "request failed");
                self.error_response(Some(id), error)
            }
        }
    }

    fn error_response(&self, id: Option<Value>, error: McpError) -> JsonRpcResponse {
        let id = if self.echo_error_id {
            Some(id.unwrap_or(Value::Null))
        } else {
            None
        };
        JsonRpcResponse::failure(id, error.into())
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            }
        })
    }

    /// Handle tools/call request — dispatches to handler modules
    fn handle_tools_call(&self, params: &Map<String, Value>) -> Result<Value, McpError> {
        let name = identifier_field(params, "name");
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let text = match ToolName::parse(&name) {
            Some(ToolName::Echo) => handlers::echo::handle(&arguments)?,
            Some(ToolName::GetTime) => handlers::time::handle(self.clock.as_ref()),
            Some(ToolName::AddNumbers) => handlers::add_numbers::handle(&arguments)?,
            Some(ToolName::GetWeatherInfo) => handlers::weather::handle(&arguments)?,
            None => return Err(McpError::ToolNotFound(name)),
        };

        Ok(json!({ "content": [TextContent::new(text)] }))
    }

    fn handle_resources_read(&self, params: &Map<String, Value>) -> Result<Value, McpError> {
        let uri = identifier_field(params, "uri");
        let resource = ResourceUri::parse(&uri).ok_or(McpError::ResourceNotFound(uri))?;
        Ok(json!({ "contents": [resource.read()?] }))
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}
