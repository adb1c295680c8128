//! # awsnews-mcp
//!
//! MCP method dispatch handler (APPLICATION layer).
//!
//! Provides `McpHandler` and `JsonRpcOutput` for routing JSON-RPC requests
//! to the MCP method implementations, and the `get_aws_news` tool that
//! maps tool arguments onto a `NewsQueryService` call.

mod dispatch;
pub mod handler;
pub mod tool;

pub use handler::{JsonRpcOutput, McpHandler, SERVER_NAME};
pub use tool::{parse_arguments, tool_definition, ArgumentError, ERROR_PREFIX, TOOL_NAME};
