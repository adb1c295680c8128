//! MCP request handler.
//!
//! Transport-agnostic: both the stdio loop and the HTTP router hand raw
//! messages (or decoded requests) to the same `McpHandler`.

use serde::Serialize;
use tracing::debug;

use awsnews_client::NewsQueryService;
use awsnews_protocol::{
    error_codes, methods, IncomingMessage, JsonRpcErrorResponse, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse,
};

use crate::dispatch::{initialize, tools_call, tools_list};

/// Server name reported during `initialize`.
pub const SERVER_NAME: &str = "aws-news-mcp-server";

/// Either half of a JSON-RPC reply.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JsonRpcOutput {
    /// A `result` reply.
    Success(JsonRpcResponse),
    /// An `error` reply.
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Serializes the reply to a single-line JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns `true` for error replies.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Routes MCP requests to their method handlers.
///
/// Holds only immutable configuration, so one instance can be shared
/// across concurrent requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct McpHandler {
    service: NewsQueryService,
}

impl McpHandler {
    /// Creates a handler that answers `get_aws_news` with `service`.
    pub fn new(service: NewsQueryService) -> Self {
        Self { service }
    }

    /// Decodes and handles one raw message.
    ///
    /// Returns `None` for notifications, which must not be answered.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcOutput> {
        match IncomingMessage::parse(raw) {
            Ok(IncomingMessage::Request(request)) => Some(self.dispatch(&request).await),
            Ok(IncomingMessage::Notification(notification)) => {
                self.handle_notification(&notification);
                None
            }
            Err(error) => {
                debug!(code = error.error.code, "rejected malformed message");
                Some(JsonRpcOutput::Error(error))
            }
        }
    }

    /// Dispatches a request to the matching MCP method.
    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        debug!(method = %request.method, id = ?id, "dispatching request");

        match request.method.as_str() {
            methods::INITIALIZE => initialize::handle_initialize(id, &request.params),
            methods::PING => crate::dispatch::respond(id, serde_json::json!({})),
            methods::TOOLS_LIST => tools_list::handle_tools_list(id),
            methods::TOOLS_CALL => {
                tools_call::handle_tools_call(id, &request.params, &self.service).await
            }
            other => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("unknown method: {other}"),
            )),
        }
    }

    /// Handles a notification. Nothing is ever sent back.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATION_INITIALIZED => debug!("client initialized"),
            methods::NOTIFICATION_CANCELLED => {
                debug!(params = ?notification.params, "client cancelled a request")
            }
            other => debug!(method = %other, "ignoring notification"),
        }
    }
}
