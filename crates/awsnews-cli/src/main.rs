//! AWS news MCP server.

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;

mod commands;
mod output;
pub(crate) mod shared;

/// Serve AWS news and blog articles to MCP clients.
#[derive(Debug, Parser)]
#[command(name = "aws-news-mcp", version, about)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the MCP server over stdio or HTTP.
    Serve(commands::serve::ServeArgs),
    /// Fetch news once and print the result envelope.
    Fetch(commands::fetch::FetchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shared::load_config(cli.config.as_deref())?;

    // Logs go to stderr; stdout carries the stdio transport.
    let filter = shared::log_filter(cli.verbose, &config.logging.level);
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    };

    tracing::debug!(config_file = ?cli.config, base_url = %config.upstream.base_url, "starting");

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Fetch(args) => commands::fetch::execute(args, &config).await,
    }
}
