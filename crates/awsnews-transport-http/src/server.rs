//! HTTP server that binds an axum Router to a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use awsnews_mcp::McpHandler;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the MCP JSON-RPC and SSE transports.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a server listening on all interfaces at `port`.
    ///
    /// # Arguments
    ///
    /// * `handler`: shared MCP dispatcher
    /// * `port`: TCP port to listen on
    /// * `token`: optional Bearer token for authentication
    pub fn new(handler: Arc<McpHandler>, port: u16, token: Option<String>) -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            state: AppState::new(handler, token),
        }
    }

    /// The address the server will bind.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| HttpTransportError::Bind {
                addr: self.addr.to_string(),
                source: e,
            })?;

        tracing::info!(
            addr = %self.addr,
            auth = self.state.token.is_some(),
            "AWS news MCP HTTP server ready"
        );

        axum::serve(listener, build_router(self.state))
            .await
            .map_err(HttpTransportError::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awsnews_client::NewsQueryService;

    fn make_handler() -> Arc<McpHandler> {
        let service = NewsQueryService::from_url_str("http://127.0.0.1:9/articles").expect("url");
        Arc::new(McpHandler::new(service))
    }

    #[test]
    fn new_sets_correct_port() {
        let server = HttpServer::new(make_handler(), 8000, None);
        assert_eq!(server.addr().port(), 8000);
        assert!(server.addr().ip().is_unspecified());
    }

    #[test]
    fn new_stores_bearer_token() {
        let server = HttpServer::new(make_handler(), 8080, Some("s3cret".to_string()));
        assert_eq!(server.state.token.as_deref(), Some("s3cret"));
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let taken = std::net::TcpListener::bind("0.0.0.0:0").expect("bind");
        let port = taken.local_addr().expect("addr").port();
        let err = HttpServer::new(make_handler(), port, None)
            .run()
            .await
            .expect_err("port in use");
        assert!(matches!(err, HttpTransportError::Bind { .. }));
    }
}
