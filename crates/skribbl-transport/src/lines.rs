//! Newline-delimited JSON frames over any async byte stream.
//!
//! Each line is one frame in the socket-event shape:
//! `{"data":{"id":30,"data":"hi"}}`, `{"joinerr":1}`, `{"login":{...}}`.
//! Useful for piping a recorded session through a bot, or bridging to a
//! real socket from another process.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use skribbl_protocol::{Codec, Inbound, JsonCodec, Outbound};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, TransportError};

/// A [`Connection`] that reads and writes one JSON frame per line.
///
/// Blank lines are skipped.
pub struct JsonLinesConnection<R, W> {
    id: ConnectionId,
    reader: Mutex<BufReader<R>>,
    writer: Mutex<W>,
    codec: JsonCodec,
    closed: AtomicBool,
}

impl<R, W> JsonLinesConnection<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Wraps a reader and writer with a fresh [`ConnectionId`].
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            id: ConnectionId::next(),
            reader: Mutex::new(BufReader::new(reader)),
            writer: Mutex::new(writer),
            codec: JsonCodec,
            closed: AtomicBool::new(false),
        }
    }
}

impl<R, W> Connection for JsonLinesConnection<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn send(&self, frame: Outbound) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::ConnectionClosed(format!("{} closed locally", self.id)));
        }
        let mut line = self.codec.encode(&frame).map_err(|e| {
            TransportError::SendFailed(io::Error::new(io::ErrorKind::InvalidInput, e))
        })?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await.map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv(&self) -> Result<Option<Inbound>, TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(None);
        }
        let mut reader = self.reader.lock().await;
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .await
                .map_err(TransportError::ReceiveFailed)?;
            if read == 0 {
                tracing::debug!(id = %self.id, "input stream ended");
                return Ok(None);
            }
            if line.trim().is_empty() {
                continue;
            }
            return self
                .codec
                .decode(line.trim().as_bytes())
                .map(Some)
                .map_err(|e| {
                    TransportError::ReceiveFailed(io::Error::new(io::ErrorKind::InvalidData, e))
                });
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.writer
                .lock()
                .await
                .shutdown()
                .await
                .map_err(TransportError::SendFailed)?;
            tracing::debug!(id = %self.id, "lines connection closed");
        }
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
