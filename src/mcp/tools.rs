use serde_json::json;

use super::protocol::Tool;

/// Built-in tools, in the order `tools/list` reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToolName {
    Echo,
    GetTime,
    AddNumbers,
    GetWeatherInfo,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::Echo,
        ToolName::GetTime,
        ToolName::AddNumbers,
        ToolName::GetWeatherInfo,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::Echo => "echo",
            ToolName::GetTime => "get_time",
            ToolName::AddNumbers => "add_numbers",
            ToolName::GetWeatherInfo => "get_weather_info",
        }
    }

    pub fn definition(self) -> Tool {
        match self {
            ToolName::Echo => Tool {
                name: self.as_str().to_string(),
                description: "Echo the provided message back to the user".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "message": {
                            "type": "string",
                            "description": "The message to echo back"
                        }
                    },
                    "required": ["message"]
                }),
            },
            ToolName::GetTime => Tool {
                name: self.as_str().to_string(),
                description: "Get the current server time".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
            ToolName::AddNumbers => Tool {
                name: self.as_str().to_string(),
                description: "Add two numbers together".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "a": {
                            "type": "integer",
                            "description": "First number"
                        },
                        "b": {
                            "type": "integer",
                            "description": "Second number"
                        }
                    },
                    "required": ["a", "b"]
                }),
            },
            ToolName::GetWeatherInfo => Tool {
                name: self.as_str().to_string(),
                description: "Get weather information for a location (mock implementation)"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "location": {
                            "type": "string",
                            "description": "The location to get weather for"
                        }
                    },
                    "required": ["location"]
                }),
            },
        }
    }
}

/// Return all MCP tool definitions
pub(crate) fn tool_definitions() -> Vec<Tool> {
    ToolName::ALL.into_iter().map(ToolName::definition).collect()
}
