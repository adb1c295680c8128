//! # awsnews-config
//!
//! Configuration management for the AWS news MCP server.
//! Supports layered config: defaults -> file -> env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError, ENV_PREFIX};
pub use schema::{AwsNewsConfig, LoggingConfig, ServerConfig, Transport, UpstreamConfig};
