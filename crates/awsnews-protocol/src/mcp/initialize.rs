//! MCP initialize method types.
//!
//! The initialize handshake is the first message exchanged between
//! client and server to negotiate capabilities and protocol version.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// MCP protocol version supported by this implementation.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Tool-related capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCapability {
    /// Whether the server emits `notifications/tools/list_changed`.
    #[serde(
        default,
        rename = "listChanged",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub list_changed: bool,
}

/// Server capabilities returned during initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tools capability (present if server exposes tools).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapability>,
}

/// Name and version of either peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

/// Request params for `initialize`.
///
/// Client capabilities are accepted as opaque JSON; this server does not
/// act on any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeParams {
    /// Protocol version requested by client.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Client capabilities.
    #[serde(default)]
    pub capabilities: Value,
    /// Client info.
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
}

/// Response for `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol version agreed by server.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
    /// Server info.
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    /// Usage hints surfaced to the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}
