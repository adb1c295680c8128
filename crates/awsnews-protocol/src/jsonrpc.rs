//! JSON-RPC 2.0 envelopes and message classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version string carried by every message.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request (expects a response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Request ID.
    pub id: RequestId,
    /// Method name.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 notification (no id, never answered).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    /// Protocol version, always "2.0".
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    pub result: Value,
}

/// JSON-RPC 2.0 error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: String,
    /// Matches the request, or `null` when the request id was unreadable.
    pub id: RequestId,
    pub error: JsonRpcError,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Request ID: a number, a string, or `null` in error replies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric ID.
    Number(i64),
    /// String ID.
    String(String),
    /// No usable ID (parse errors, invalid requests).
    Null,
}

/// Standard JSON-RPC error codes.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC 2.0 request.
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    /// Creates a success response.
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    /// Creates an error response.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcError {
                code,
                message: message.into(),
                data: None,
            },
        }
    }

    /// Creates an error response with `id: null`.
    pub fn without_id(code: i32, message: impl Into<String>) -> Self {
        Self::error(RequestId::Null, code, message)
    }
}

/// A decoded inbound message.
#[derive(Debug, Clone)]
pub enum IncomingMessage {
    /// Carries an id; exactly one response is owed.
    Request(JsonRpcRequest),
    /// No id; must not be answered.
    Notification(JsonRpcNotification),
}

impl IncomingMessage {
    /// Decodes one raw JSON-RPC message.
    ///
    /// A message with a non-null `id` is a request, anything else is a
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns a ready-to-send error response: `PARSE_ERROR` for invalid
    /// JSON, `INVALID_REQUEST` for JSON that is not a JSON-RPC message.
    pub fn parse(raw: &str) -> Result<Self, JsonRpcErrorResponse> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            JsonRpcErrorResponse::without_id(error_codes::PARSE_ERROR, format!("parse error: {e}"))
        })?;

        let id = value.get("id").filter(|v| !v.is_null()).cloned();
        match id {
            Some(id) => serde_json::from_value::<JsonRpcRequest>(value)
                .map(Self::Request)
                .map_err(|e| {
                    let id = serde_json::from_value(id).unwrap_or(RequestId::Null);
                    JsonRpcErrorResponse::error(
                        id,
                        error_codes::INVALID_REQUEST,
                        format!("invalid request: {e}"),
                    )
                }),
            None => serde_json::from_value::<JsonRpcNotification>(value)
                .map(Self::Notification)
                .map_err(|e| {
                    JsonRpcErrorResponse::without_id(
                        error_codes::INVALID_REQUEST,
                        format!("invalid request: {e}"),
                    )
                }),
        }
    }
}
