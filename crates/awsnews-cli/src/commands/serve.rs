//! `aws-news-mcp serve` command.
//!
//! Starts the MCP server over stdio or HTTP, exposing `get_aws_news`
//! via JSON-RPC 2.0.

use std::sync::Arc;

use clap::Args;

use awsnews_config::{AwsNewsConfig, Transport};
use awsnews_transport_http::HttpServer;
use awsnews_transport_stdio::{McpHandler, McpServer, StdioTransport};

use crate::shared;

/// Start the MCP server (stdio or HTTP).
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport mode: stdio, or http/sse for the HTTP server
    /// [default: from config, else stdio].
    #[arg(long, value_parser = ["stdio", "http", "sse"])]
    pub transport: Option<String>,
    /// TCP port for HTTP transport [default: from config, else 8000].
    #[arg(long)]
    pub port: Option<u16>,
    /// Bearer token for HTTP transport authentication (optional).
    #[arg(long)]
    pub token: Option<String>,
}

/// Settings after merging command-line flags over configuration.
#[derive(Debug, PartialEq, Eq)]
struct ServeSettings {
    transport: Transport,
    port: u16,
    token: Option<String>,
}

fn resolve(args: &ServeArgs, config: &AwsNewsConfig) -> anyhow::Result<ServeSettings> {
    let transport = match &args.transport {
        Some(raw) => raw.parse::<Transport>().map_err(|e| anyhow::anyhow!(e))?,
        None => config.server.transport,
    };
    Ok(ServeSettings {
        transport,
        port: args.port.unwrap_or(config.server.port),
        token: args.token.clone().or_else(|| config.server.token.clone()),
    })
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &AwsNewsConfig) -> anyhow::Result<()> {
    let settings = resolve(args, config)?;
    let handler = McpHandler::new(shared::build_service(config)?);

    match settings.transport {
        Transport::Http => {
            let server = HttpServer::new(Arc::new(handler), settings.port, settings.token);
            tokio::select! {
                result = server.run() => {
                    result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
        Transport::Stdio => {
            let mut server = McpServer::new(StdioTransport::stdio(), handler);
            tracing::info!("AWS news MCP server ready on stdio");
            tokio::select! {
                result = server.run() => {
                    result.map_err(|e| anyhow::anyhow!("server error: {e}"))?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
    }

    Ok(())
}
