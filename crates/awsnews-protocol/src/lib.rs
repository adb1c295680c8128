//! # awsnews-protocol
//!
//! JSON-RPC 2.0 and MCP type definitions.
//! This crate defines the wire format spoken between an AI agent and
//! the news server, independent of the transport carrying it.

pub mod jsonrpc;
pub mod mcp;

pub use jsonrpc::*;
pub use mcp::methods;
