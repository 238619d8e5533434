use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Map;
use std::io::{self, BufRead, Write};

mod client;
mod config;
mod display;
mod logging;

use client::McpClient;

#[derive(Parser)]
#[command(name = "mcp-client")]
#[command(about = "Interactive client for the Vercel MCP server")]
#[command(version)]
struct Cli {
    /// Server endpoint (overrides MCP_SERVER_URL)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds (overrides MCP_TIMEOUT)
    #[arg(long)]
    timeout: Option<u64>,

    /// Verbose logging (same as MCP_DEBUG=true)
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Show server status
    Status,

    /// List available tools
    Tools,

    /// Call a tool
    Call {
        /// Tool name
        name: String,

        /// Tool argument as key=value (repeatable)
        #[arg(long = "arg", short)]
        args: Vec<String>,
    },

    /// List available resources
    Resources,

    /// Read a resource
    Read {
        /// Resource URI
        uri: String,
    },

    /// Call every built-in tool with sample arguments
    TestAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = config::Config::load()?;

    if let Some(url) = cli.url {
        config.client.server_url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.client.timeout_secs = timeout;
    }
    let debug = cli.debug || config.client.debug;
    logging::init(debug, "pretty");

    if debug {
        println!("{}", "Debug mode enabled".dimmed());
        println!("{}", format!("Server URL: {}", config.client.server_url).dimmed());
        println!("{}", format!("Timeout: {}s", config.client.timeout_secs).dimmed());
    }

    let client = McpClient::new(&config.client.server_url, config.client.timeout_secs)?;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => run_menu(&client).await?,
        Commands::Status => {
            test_connection(&client).await;
        }
        Commands::Tools => {
            list_tools(&client).await;
        }
        Commands::Call { name, args } => {
            let tools = client.list_tools().await.unwrap_or_default();
            let tool = tools.iter().find(|t| t.name == name);
            match display::parse_key_values(tool, &args) {
                Ok(arguments) => {
                    if let Some(result) = call_tool(&client, &name, arguments).await {
                        println!("✅ Result: {}", result);
                    }
                }
                Err(e) => println!("❌ {}", e),
            }
        }
        Commands::Resources => {
            list_resources(&client).await;
        }
        Commands::Read { uri } => read_resource(&client, &uri).await,
        Commands::TestAll => test_all_tools(&client).await,
    }

    Ok(())
}

async fn run_menu(client: &McpClient) -> Result<()> {
    print_banner(client.server_url());

    if !test_connection(client).await {
        println!("❌ Failed to connect to server. Exiting.");
        return Ok(());
    }
    println!();

    if !initialize(client).await {
        println!("❌ Failed to initialize MCP connection. Exiting.");
        return Ok(());
    }
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("\n{}", "=".repeat(50));
        println!("{}", "MCP Client Menu".bold().cyan());
        println!("1. List Tools");
        println!("2. Call Tool");
        println!("3. List Resources");
        println!("4. Read Resource");
        println!("5. Test All Tools");
        println!("6. Exit");

        let Some(choice) = prompt_choice(&mut input, "Select an option", &["1", "2", "3", "4", "5", "6"])?
        else {
            break;
        };

        match choice.as_str() {
            "1" => {
                list_tools(client).await;
            }
            "2" => {
                let tools = list_tools(client).await;
                if tools.is_empty() {
                    continue;
                }

                let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
                let Some(name) = prompt_choice(&mut input, "Enter tool name", &names)? else {
                    break;
                };
                let Some(tool) = tools.iter().find(|t| t.name == name) else {
                    println!("❌ Tool not found");
                    continue;
                };

                let mut arguments = Map::new();
                for param in tool.parameters() {
                    let Some(raw) = prompt(&mut input, &display::parameter_prompt(&param))? else {
                        return Ok(());
                    };
                    match display::coerce_argument(&param.kind, &raw) {
                        Ok(value) => {
                            arguments.insert(param.name.clone(), value);
                        }
                        Err(_) => println!("❌ Invalid integer for {}", param.name),
                    }
                }

                if let Some(result) = call_tool(client, &name, arguments).await {
                    println!("✅ Result: {}", result);
                }
            }
            "3" => {
                list_resources(client).await;
            }
            "4" => {
                let resources = list_resources(client).await;
                if resources.is_empty() {
                    continue;
                }

                let uris: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
                let Some(uri) = prompt_choice(&mut input, "Enter resource URI", &uris)? else {
                    break;
                };
                read_resource(client, &uri).await;
            }
            "5" => test_all_tools(client).await,
            _ => {
                println!("👋 Goodbye!");
                break;
            }
        }
    }

    Ok(())
}

fn print_banner(server_url: &str) {
    let title = "MCP Client for Vercel MCP Server";
    let target = format!("Connecting to: {}", server_url);
    let width = title.len().max(target.len()) + 2;

    println!("{}", format!("┌{}┐", "─".repeat(width)).blue());
    println!("{} {:<w$} {}", "│".blue(), title.bold().blue(), "│".blue(), w = width - 2);
    println!("{} {:<w$} {}", "│".blue(), target.dimmed(), "│".blue(), w = width - 2);
    println!("{}", format!("└{}┘", "─".repeat(width)).blue());
}

async fn test_connection(client: &McpClient) -> bool {
    match client.status().await {
        Ok(status) => {
            println!("✅ Server Status: {}", status.status);
            println!("📊 Available Tools: {}", status.tools);
            println!("📚 Available Resources: {}", status.resources);
            true
        }
        Err(e) => {
            println!("❌ Connection failed: {:#}", e);
            false
        }
    }
}

async fn initialize(client: &McpClient) -> bool {
    println!("🔌 Initializing MCP connection...");
    match client.initialize().await {
        Ok(info) => {
            println!("✅ Connected to: {}", info.server_info.name);
            println!("📋 Version: {}", info.server_info.version);
            println!("🔧 Protocol: {}", info.protocol_version);
            true
        }
        Err(e) => {
            println!("❌ Initialization failed: {:#}", e);
            false
        }
    }
}

async fn list_tools(client: &McpClient) -> Vec<client::ToolInfo> {
    println!("🔧 Fetching available tools...");
    match client.list_tools().await {
        Ok(tools) => {
            display::print_tools(&tools);
            tools
        }
        Err(e) => {
            println!("❌ Failed to get tools: {:#}", e);
            Vec::new()
        }
    }
}

async fn call_tool(
    client: &McpClient,
    name: &str,
    arguments: Map<String, serde_json::Value>,
) -> Option<String> {
    println!("🔨 Calling tool: {}", name);
    match client.call_tool(name, arguments).await {
        Ok(text) => Some(text),
        Err(e) => {
            println!("❌ Tool call failed: {:#}", e);
            None
        }
    }
}

async fn list_resources(client: &McpClient) -> Vec<client::ResourceInfo> {
    println!("📚 Fetching available resources...");
    match client.list_resources().await {
        Ok(resources) => {
            display::print_resources(&resources);
            resources
        }
        Err(e) => {
            println!("❌ Failed to get resources: {:#}", e);
            Vec::new()
        }
    }
}

async fn read_resource(client: &McpClient, uri: &str) {
    println!("📖 Reading resource: {}", uri);
    match client.read_resource(uri).await {
        Ok(content) if !content.is_empty() => println!("✅ Resource content:\n{}", content),
        Ok(_) => {}
        Err(e) => println!("❌ Resource read failed: {:#}", e),
    }
}

async fn test_all_tools(client: &McpClient) {
    println!("🧪 Testing all tools...");

    let cases = [
        ("Echo", "echo", serde_json::json!({"message": "Hello from MCP Client!"})),
        ("Time", "get_time", serde_json::json!({})),
        ("Add Numbers (15 + 25)", "add_numbers", serde_json::json!({"a": 15, "b": 25})),
        ("Weather", "get_weather_info", serde_json::json!({"location": "San Francisco"})),
    ];

    for (label, name, arguments) in cases {
        let arguments = arguments.as_object().cloned().unwrap_or_default();
        let result = call_tool(client, name, arguments).await;
        println!("{}: {}", label, result.as_deref().unwrap_or("None"));
    }

    println!("✅ All tools tested successfully!");
}

/// Read one line; `None` on end of input
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Re-prompt until the answer is one of `choices`; `None` on end of input
fn prompt_choice<R: BufRead>(input: &mut R, label: &str, choices: &[&str]) -> Result<Option<String>> {
    let label = format!("{} [{}]", label, choices.join("/"));
    loop {
        let Some(answer) = prompt(input, &label)? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if choices.contains(&answer) {
            return Ok(Some(answer.to_string()));
        }
        println!("{}", "Please select one of the available options".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_choice_retries_until_valid() {
        let mut input = "9\n\n2\n".as_bytes();
        let choice = prompt_choice(&mut input, "Select", &["1", "2"]).unwrap();
        assert_eq!(choice.as_deref(), Some("2"));
    }

    #[test]
    fn test_prompt_choice_end_of_input() {
        let mut input = "".as_bytes();
        assert!(prompt_choice(&mut input, "Select", &["1"]).unwrap().is_none());
    }

    #[test]
    fn test_prompt_strips_line_ending() {
        let mut input = "San Francisco\r\n".as_bytes();
        assert_eq!(
            prompt(&mut input, "Enter location").unwrap().as_deref(),
            Some("San Francisco")
        );
    }

    #[test]
    fn test_cli_call_arguments() {
        let cli = Cli::try_parse_from([
            "mcp-client",
            "--url",
            "http://localhost:4000",
            "call",
            "add_numbers",
            "--arg",
            "a=15",
            "-a",
            "b=25",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost:4000"));
        match cli.command {
            Some(Commands::Call { name, args }) => {
                assert_eq!(name, "add_numbers");
                assert_eq!(args, ["a=15", "b=25"]);
            }
            _ => panic!("expected call subcommand"),
        }
    }

    #[test]
    fn test_cli_defaults_to_menu() {
        let cli = Cli::try_parse_from(["mcp-client"]).unwrap();
        assert!(cli.command.is_none());
    }
}
