//! Handles the `initialize` MCP method.

use serde_json::Value;
use tracing::info;

use awsnews_protocol::mcp::initialize::{
    Implementation, InitializeParams, InitializeResult, ServerCapabilities, ToolCapability,
    PROTOCOL_VERSION,
};
use awsnews_protocol::RequestId;

use crate::dispatch::{invalid_params, respond};
use crate::handler::{JsonRpcOutput, SERVER_NAME};

const INSTRUCTIONS: &str =
    "Use get_aws_news to look up recent AWS announcements and blog posts for a service or topic.";

/// Handles the `initialize` request and returns the server capabilities.
pub(crate) fn handle_initialize(id: RequestId, params: &Option<Value>) -> JsonRpcOutput {
    if let Some(p) = params {
        match serde_json::from_value::<InitializeParams>(p.clone()) {
            Ok(init) => info!(
                client = %init.client_info.name,
                client_version = %init.client_info.version,
                protocol = %init.protocol_version,
                "client connected"
            ),
            Err(e) => return invalid_params(id, format!("invalid initialize params: {e}")),
        }
    }

    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolCapability::default()),
        },
        server_info: Implementation {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        instructions: Some(INSTRUCTIONS.to_string()),
    };

    respond(id, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_of(out: JsonRpcOutput) -> Value {
        match out {
            JsonRpcOutput::Success(r) => r.result,
            JsonRpcOutput::Error(e) => panic!("unexpected error: {}", e.error.message),
        }
    }

    #[test]
    fn initialize_without_params() {
        let v = result_of(handle_initialize(RequestId::Number(1), &None));
        assert_eq!(v["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(v["serverInfo"]["name"], SERVER_NAME);
        assert!(v["capabilities"]["tools"].is_object());
    }

    #[test]
    fn initialize_with_client_info() {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {"name": "agent", "version": "2.0"}
        });
        let v = result_of(handle_initialize(RequestId::Number(2), &Some(params)));
        assert_eq!(v["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn initialize_rejects_bad_params() {
        let out = handle_initialize(RequestId::Number(3), &Some(json!({"protocolVersion": 5})));
        assert!(out.is_error());
    }
}
