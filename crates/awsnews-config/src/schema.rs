//! Configuration schema types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsNewsConfig {
    /// News API endpoint.
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// MCP front-end settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where news is fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the articles endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.aws-news.com/articles".to_string()
}

/// MCP transport selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Line-delimited JSON-RPC on stdin/stdout.
    #[default]
    Stdio,
    /// HTTP server: JSON-RPC over `POST /mcp` and MCP over SSE (`GET /sse`).
    #[serde(alias = "sse")]
    Http,
}

impl Transport {
    /// Lowercase name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "sse" => Ok(Self::Http),
            other => Err(format!(
                "unknown transport '{other}' (expected stdio, http or sse)"
            )),
        }
    }
}

/// MCP front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Transport used by `serve` when none is given on the command line.
    #[serde(default)]
    pub transport: Transport,
    /// TCP port for the HTTP transport.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bearer token required by the HTTP transport, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            port: default_port(),
            token: None,
        }
    }
}

fn default_port() -> u16 {
    8000
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "awsnews_client=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
