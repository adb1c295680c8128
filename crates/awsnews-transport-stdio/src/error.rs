//! Transport-layer error types.

use thiserror::Error;

/// Errors from the stdio transport layer.
///
/// Malformed messages are not errors here: they are answered with a
/// JSON-RPC error reply and the loop keeps going.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from stdin.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),
    /// Failed to write to stdout.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
    /// A reply could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
