//! MCP server loop over stdio transport.
//!
//! Reads JSON-RPC messages line by line. Each request runs as its own
//! task, so a slow `tools/call` does not hold up later requests; replies
//! are written as they complete and carry their request id.
//! `notifications/cancelled` aborts the named request, which then gets no
//! reply. Other notifications get no reply either.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use awsnews_mcp::{JsonRpcOutput, McpHandler};
use awsnews_protocol::{methods, IncomingMessage, JsonRpcNotification, RequestId};

use crate::error::TransportError;
use crate::transport::{self, StdioTransport};

/// MCP server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: McpHandler,
}

impl<R, W> McpServer<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new server with the given transport and handler.
    pub fn new(transport: StdioTransport<R, W>, handler: McpHandler) -> Self {
        Self { transport, handler }
    }

    /// Runs the server loop until the input stream is closed.
    ///
    /// Requests still running at EOF are allowed to finish and their
    /// replies are written before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures on the streams themselves.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        info!("MCP server listening on stdio");

        let (reader, writer) = self.transport.split_mut();
        let handler = &self.handler;
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcOutput>();

        let read_loop = async move {
            let mut in_flight: HashMap<RequestId, JoinHandle<()>> = HashMap::new();

            while let Some(line) = transport::read_message(reader).await? {
                in_flight.retain(|_, task| !task.is_finished());

                match IncomingMessage::parse(&line) {
                    Ok(IncomingMessage::Request(request)) => {
                        let id = request.id.clone();
                        let handler = handler.clone();
                        let tx = tx.clone();
                        let task = tokio::spawn(async move {
                            let output = handler.dispatch(&request).await;
                            if tx.send(output).is_err() {
                                debug!(id = ?request.id, "output closed, reply dropped");
                            }
                        });
                        in_flight.insert(id, task);
                    }
                    Ok(IncomingMessage::Notification(notification)) => {
                        if notification.method == methods::NOTIFICATION_CANCELLED {
                            cancel_request(&mut in_flight, &notification);
                        }
                        handler.handle_notification(&notification);
                    }
                    Err(error) => {
                        debug!(code = error.error.code, "rejected malformed message");
                        if tx.send(JsonRpcOutput::Error(error)).is_err() {
                            debug!("output closed, error reply dropped");
                        }
                    }
                }
            }

            info!(in_flight = in_flight.len(), "stdin closed, draining replies");
            Ok::<_, TransportError>(())
        };

        // Ends once the read loop and every request task have dropped their senders.
        let write_loop = async move {
            while let Some(output) = rx.recv().await {
                let json = output.to_json()?;
                transport::write_message(writer, &json).await?;
            }
            Ok::<_, TransportError>(())
        };

        tokio::try_join!(read_loop, write_loop)?;
        info!("shutting down");
        Ok(())
    }
}

/// Aborts the request named by a `notifications/cancelled` message.
///
/// Unknown or already-finished ids are ignored.
fn cancel_request(
    in_flight: &mut HashMap<RequestId, JoinHandle<()>>,
    notification: &JsonRpcNotification,
) {
    let id = notification
        .params
        .as_ref()
        .and_then(|params| params.get("requestId"))
        .cloned()
        .and_then(|raw| serde_json::from_value::<RequestId>(raw).ok());
    let Some(id) = id else {
        debug!("cancellation without a usable requestId");
        return;
    };

    match in_flight.remove(&id) {
        Some(task) => {
            task.abort();
            info!(id = ?id, "request cancelled by client");
        }
        None => debug!(id = ?id, "cancellation for unknown or finished request"),
    }
}
