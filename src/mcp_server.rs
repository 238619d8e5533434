//! Vercel MCP Server
//!
//! Serves the Model Context Protocol dispatcher over HTTP, or over
//! newline-delimited JSON-RPC on stdin/stdout with `--stdio`.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

mod config;
mod http;
mod logging;
mod mcp;

#[derive(Parser)]
#[command(name = "vercel-mcp")]
#[command(about = "Minimal MCP server: initialize, tools and resources over JSON-RPC")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides config and HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// Speak JSON-RPC over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Log format: pretty or json
    #[arg(long)]
    log_format: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::load()?;

    let (verbose, log_format) = log_settings(&cli, &config.server);
    logging::init(verbose, log_format);

    let server = Arc::new(mcp::McpServer::new().echo_error_id(config.server.echo_error_id));

    if cli.stdio {
        tracing::info!("serving MCP over stdio");
        let stdin = io::stdin();
        let stdout = io::stdout();
        return serve_lines(&server, stdin.lock(), stdout.lock());
    }

    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr: SocketAddr = (host.as_str(), port)
        .to_socket_addrs()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?
        .next()
        .with_context(|| format!("{} did not resolve to an address", host))?;

    http::HttpServer::bind(server, addr).await?.run().await?;
    Ok(())
}

/// Debug flag and log format for the server; `MCP_DEBUG` belongs to the client.
fn log_settings<'a>(cli: &'a Cli, server: &'a config::ServerConfig) -> (bool, &'a str) {
    let format = cli.log_format.as_deref().unwrap_or(&server.log_format);
    (cli.verbose, format)
}

/// Answer one JSON-RPC request per input line until EOF.
///
/// Lines that are not UTF-8 or not JSON get a parse error reply and reading
/// continues. I/O errors end the loop and are returned.
fn serve_lines<R: BufRead, W: Write>(
    server: &mcp::McpServer,
    mut reader: R,
    mut writer: W,
) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read request line")?;
        if read == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => match serde_json::from_str::<serde_json::Value>(line) {
                Ok(request) => server.handle(request),
                Err(e) => {
                    tracing::warn!(error = %e, "unparseable request line");
                    parse_error(e)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "request line is not valid UTF-8");
                parse_error(e)
            }
        };

        writeln!(writer, "{}", serde_json::to_string(&response)?)?;
        writer.flush()?;
    }

    Ok(())
}

fn parse_error(error: impl std::fmt::Display) -> mcp::protocol::JsonRpcResponse {
    mcp::protocol::JsonRpcResponse::failure(
        Some(serde_json::Value::Null),
        mcp::protocol::JsonRpcError {
            code: mcp::protocol::error_codes::PARSE_ERROR,
            message: format!("Parse error: {}", error),
            data: None,
        },
    )
}
