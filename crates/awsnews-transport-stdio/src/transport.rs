//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`,
//! as required by the MCP stdio transport.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::error::TransportError;

/// Reads messages from a byte stream and writes replies to another.
///
/// Generic over reader/writer so tests can drive it with in-memory
/// buffers instead of the process's stdio.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// Binds the transport to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new transport with the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Reads the next non-blank line, trimmed.
    ///
    /// Returns `None` on EOF (connection closed).
    pub async fn read_message(&mut self) -> Result<Option<String>, TransportError> {
        read_message(&mut self.reader).await
    }

    /// Writes one message followed by `\n` and flushes.
    pub async fn write_message(&mut self, message: &str) -> Result<(), TransportError> {
        write_message(&mut self.writer, message).await
    }

    /// Borrows the read and write halves separately.
    pub(crate) fn split_mut(&mut self) -> (&mut BufReader<R>, &mut W) {
        (&mut self.reader, &mut self.writer)
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

pub(crate) async fn read_message<R>(
    reader: &mut BufReader<R>,
) -> Result<Option<String>, TransportError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(TransportError::Read)?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            trace!(len = trimmed.len(), "read message");
            return Ok(Some(trimmed.to_string()));
        }
    }
}

pub(crate) async fn write_message<W>(writer: &mut W, message: &str) -> Result<(), TransportError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    trace!(len = message.len(), "writing message");

    writer
        .write_all(message.as_bytes())
        .await
        .map_err(TransportError::Write)?;
    writer.write_all(b"\n").await.map_err(TransportError::Write)?;
    writer.flush().await.map_err(TransportError::Write)
}
