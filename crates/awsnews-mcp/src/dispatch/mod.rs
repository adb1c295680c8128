//! MCP method dispatch functions.
//!
//! Each sub-module handles one MCP method as a free function,
//! keeping `McpHandler` itself thin (struct + routing only).

use serde::Serialize;

use awsnews_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};

use crate::handler::JsonRpcOutput;

pub(crate) mod initialize;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

/// Wraps `result` in a success reply, or an internal error if it does
/// not serialize.
pub(crate) fn respond<T: Serialize>(id: RequestId, result: T) -> JsonRpcOutput {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}

/// Builds an `INVALID_PARAMS` error reply.
pub(crate) fn invalid_params(id: RequestId, message: impl Into<String>) -> JsonRpcOutput {
    JsonRpcOutput::Error(JsonRpcErrorResponse::error(
        id,
        error_codes::INVALID_PARAMS,
        message,
    ))
}
