//! Axum router for the MCP HTTP transports.
//! Routes: `POST /mcp` (JSON-RPC), `GET /sse` and `POST /messages/` (MCP over SSE),
//! `GET /health` (liveness), `GET /health/ready` (readiness).

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use awsnews_mcp::{McpHandler, SERVER_NAME};

use crate::auth;
use crate::sse::{self, SessionRegistry};

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP request dispatcher.
    pub handler: Arc<McpHandler>,
    /// Optional Bearer token (None = no authentication required).
    pub token: Option<String>,
    /// Open SSE sessions.
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(handler: Arc<McpHandler>, token: Option<String>) -> Self {
        Self {
            handler,
            token,
            sessions: SessionRegistry::default(),
        }
    }
}

/// Builds the axum `Router` with all MCP routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/sse", get(sse::handle_sse))
        .route(sse::MESSAGES_PATH, post(sse::handle_post_message))
        .route("/messages", post(sse::handle_post_message))
        .route("/health", get(handle_health))
        .route("/health/ready", get(handle_ready))
        .with_state(state)
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": SERVER_NAME}))
}

/// Readiness check. The server holds no warm-up state, so it is ready
/// as soon as it accepts connections.
async fn handle_ready() -> impl IntoResponse {
    Json(json!({"status": "ready", "service": SERVER_NAME}))
}

/// Checks the bearer token when one is configured.
pub(crate) fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(ref token) = state.token else {
        return Ok(());
    };
    auth::validate_bearer(headers, token).map_err(|status| {
        warn!("rejected MCP request with missing or invalid bearer token");
        (status, Json(json!({"error": "unauthorized"}))).into_response()
    })
}

async fn handle_mcp(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let Some(output) = state.handler.handle_message(&body).await else {
        return StatusCode::NO_CONTENT.into_response();
    };

    match output.to_json() {
        Ok(json_str) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json_str,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32603, "message": e.to_string()}
            })),
        )
            .into_response(),
    }
}
