//! Handles the `tools/call` MCP method.

use serde_json::Value;
use tracing::{debug, warn};

use awsnews_client::NewsQueryService;
use awsnews_protocol::mcp::tools::{ToolsCallParams, ToolsCallResult};
use awsnews_protocol::RequestId;

use crate::dispatch::{invalid_params, respond};
use crate::handler::JsonRpcOutput;
use crate::tool::{parse_arguments, ERROR_PREFIX, TOOL_NAME};

/// Handles the `tools/call` request.
///
/// Protocol problems (bad params, unknown tool, bad arguments) are
/// JSON-RPC errors. Fetch failures are ordinary tool results flagged
/// with `isError`, so the agent sees the message text.
pub(crate) async fn handle_tools_call(
    id: RequestId,
    params: &Option<Value>,
    service: &NewsQueryService,
) -> JsonRpcOutput {
    // 1. Parse params
    let call_params = match params {
        Some(p) => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => return invalid_params(id, format!("invalid tools/call params: {e}")),
        },
        None => return invalid_params(id, "tools/call requires params"),
    };

    // 2. Resolve tool
    if call_params.name != TOOL_NAME {
        return invalid_params(id, format!("Unknown tool: {}", call_params.name));
    }

    // 3. Map arguments
    let query = match parse_arguments(&call_params.arguments) {
        Ok(q) => q,
        Err(e) => return invalid_params(id, e.to_string()),
    };

    // 4. Fetch
    debug!(topic = %query.topic, news_type = %query.news_type, "calling get_aws_news");
    let result = match service.fetch_news(&query).await {
        Ok(envelope) => match envelope.to_pretty_json() {
            Ok(text) => ToolsCallResult::text(text),
            Err(e) => ToolsCallResult::error_text(format!("{ERROR_PREFIX}{e}")),
        },
        Err(e) => {
            warn!(topic = %query.topic, error = %e, "get_aws_news failed");
            ToolsCallResult::error_text(format!("{ERROR_PREFIX}{e}"))
        }
    };

    respond(id, result)
}
