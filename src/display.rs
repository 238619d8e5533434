use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{Table, Tabled};

use crate::client::{ResourceInfo, ToolInfo, ToolParameter};

/// Table row for the tool list
#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Parameters")]
    parameters: String,
}

/// Table row for the resource list
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    mime_type: String,
}

/// Print the tool list as a table
pub fn print_tools(tools: &[ToolInfo]) {
    println!("{}", "Available MCP Tools".bold());

    let rows: Vec<ToolRow> = tools
        .iter()
        .map(|tool| ToolRow {
            name: tool.name.clone(),
            description: or_placeholder(&tool.description, "No description"),
            parameters: format_parameters(&tool.parameters()),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Print the resource list as a table
pub fn print_resources(resources: &[ResourceInfo]) {
    println!("{}", "Available MCP Resources".bold());

    let rows: Vec<ResourceRow> = resources
        .iter()
        .map(|resource| ResourceRow {
            uri: resource.uri.clone(),
            name: resource.name.clone(),
            description: or_placeholder(&resource.description, "No description"),
            mime_type: resource.mime_type.clone(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// `message (string) *, extra (integer)`, or `None` for a tool without parameters
pub fn format_parameters(params: &[ToolParameter]) -> String {
    if params.is_empty() {
        return "None".to_string();
    }

    params
        .iter()
        .map(|p| {
            let mut label = format!("{} ({})", p.name, p.kind);
            if p.required {
                label.push_str(" *");
            }
            label
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt label for one tool parameter
pub fn parameter_prompt(param: &ToolParameter) -> String {
    let kind = if param.kind == "integer" { "integer" } else { "string" };
    format!(
        "Enter {} ({}){}",
        param.name,
        kind,
        if param.required { " *" } else { "" }
    )
}

/// Convert raw user input to a JSON value according to the schema type
pub fn coerce_argument(kind: &str, raw: &str) -> Result<Value, String> {
    match kind {
        "integer" => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("Invalid integer: '{}'", raw)),
        _ => Ok(Value::String(raw.to_string())),
    }
}

/// Parse `key=value` pairs into tool arguments, typed by the tool's schema
pub fn parse_key_values(tool: Option<&ToolInfo>, pairs: &[String]) -> Result<Map<String, Value>, String> {
    let params = tool.map(|t| t.parameters()).unwrap_or_default();
    let mut arguments = Map::new();

    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected key=value, got '{}'", pair))?;
        let kind = params
            .iter()
            .find(|p| p.name == key)
            .map(|p| p.kind.as_str())
            .unwrap_or("string");
        let value = coerce_argument(kind, raw).map_err(|e| format!("{} for {}", e, key))?;
        arguments.insert(key.to_string(), value);
    }

    Ok(arguments)
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
