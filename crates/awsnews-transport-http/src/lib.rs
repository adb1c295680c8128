//! HTTP transport adapter for the AWS news MCP server.
//! Exposes MCP over `POST /mcp` and over server-sent events (`GET /sse`),
//! with optional Bearer token authentication.

pub mod auth;
mod error;
pub mod router;
pub mod server;
pub mod sse;

pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
pub use sse::SessionRegistry;
