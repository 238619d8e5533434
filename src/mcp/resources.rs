use serde::Serialize;

use super::error::McpError;
use super::protocol::{Resource, ResourceContents};

/// Built-in resources, in the order `resources/list` reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourceUri {
    ServerConfig,
}

impl ResourceUri {
    pub const ALL: [ResourceUri; 1] = [ResourceUri::ServerConfig];

    pub fn parse(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resource| resource.as_str() == uri)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceUri::ServerConfig => "config://server",
        }
    }

    pub fn definition(self) -> Resource {
        match self {
            ResourceUri::ServerConfig => Resource {
                uri: self.as_str().to_string(),
                name: "Server Configuration".to_string(),
                description: "Server configuration information".to_string(),
                mime_type: "application/json".to_string(),
            },
        }
    }

    /// Render the resource body.
    pub fn read(self) -> Result<ResourceContents, McpError> {
        match self {
            ResourceUri::ServerConfig => Ok(ResourceContents {
                uri: self.as_str().to_string(),
                mime_type: "application/json".to_string(),
                text: serde_json::to_string_pretty(&ServerConfigPayload::current())?,
            }),
        }
    }
}

/// Body of `config://server`. Field order is the serialized key order.
#[derive(Debug, Serialize)]
struct ServerConfigPayload {
    version: &'static str,
    environment: &'static str,
    features: [&'static str; 2],
}

impl ServerConfigPayload {
    fn current() -> Self {
        Self {
            version: "1.0.0",
            environment: "vercel",
            features: ["tools", "resources"],
        }
    }
}

/// Return all MCP resource definitions
pub(crate) fn resource_definitions() -> Vec<Resource> {
    ResourceUri::ALL
        .into_iter()
        .map(ResourceUri::definition)
        .collect()
}
