//! # awsnews-types
//!
//! Domain types for the AWS news MCP server.
//! Pure data: query parameters, the response envelope, tool argument
//! descriptors and the error taxonomy. No I/O lives here.

pub mod error;
pub mod news;
pub mod tool;

// Re-exports for convenience.
pub use error::{DiagnosticError, NewsError, INVALID_DATE_MESSAGE};
pub use news::{NewsQueryParams, NewsType, QueryResult, DEFAULT_LIMIT};
pub use tool::ToolArgument;
