//! In-memory connection backed by tokio channels.

use std::sync::atomic::{AtomicBool, Ordering};

use skribbl_protocol::{Envelope, Inbound, Outbound};
use tokio::sync::{Mutex, mpsc};

use crate::{Connection, ConnectionId, TransportError};

/// Creates a connected pair: the client side and the server side.
pub fn channel() -> (ChannelConnection, ChannelPeer) {
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let id = ConnectionId::next();
    tracing::debug!(%id, "channel connection created");

    (
        ChannelConnection {
            id,
            inbound: Mutex::new(inbound_rx),
            outbound: outbound_tx,
            closed: AtomicBool::new(false),
        },
        ChannelPeer {
            inbound: inbound_tx,
            outbound: outbound_rx,
        },
    )
}

/// The client end, handed to the room.
pub struct ChannelConnection {
    id: ConnectionId,
    inbound: Mutex<mpsc::UnboundedReceiver<Inbound>>,
    outbound: mpsc::UnboundedSender<Outbound>,
    closed: AtomicBool,
}

impl Connection for ChannelConnection {
    async fn send(&self, frame: Outbound) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::ConnectionClosed(format!("{} closed locally", self.id)));
        }
        self.outbound
            .send(frame)
            .map_err(|_| TransportError::ConnectionClosed(format!("{} peer dropped", self.id)))
    }

    async fn recv(&self) -> Result<Option<Inbound>, TransportError> {
        Ok(self.inbound.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), TransportError> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.inbound.lock().await.close();
            tracing::debug!(id = %self.id, "channel connection closed");
        }
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

/// The server end: scripts inbound frames and observes what the client sent.
pub struct ChannelPeer {
    inbound: mpsc::UnboundedSender<Inbound>,
    outbound: mpsc::UnboundedReceiver<Outbound>,
}

impl ChannelPeer {
    /// Queues a frame for the connection to receive.
    pub fn push(&self, frame: Inbound) -> Result<(), TransportError> {
        self.inbound
            .send(frame)
            .map_err(|_| TransportError::ConnectionClosed("client side closed".into()))
    }

    /// Pushes a regular `data` frame.
    pub fn push_data(&self, envelope: Envelope) -> Result<(), TransportError> {
        self.push(Inbound::Data(envelope))
    }

    /// Pushes a join rejection.
    pub fn reject(&self, reason: i64) -> Result<(), TransportError> {
        self.push(Inbound::JoinError(reason))
    }

    /// Waits for the next frame the client sent. `None` once the client
    /// side is gone and everything was drained.
    pub async fn next_outbound(&mut self) -> Option<Outbound> {
        self.outbound.recv().await
    }

    /// The next already-sent frame, without waiting.
    pub fn try_next_outbound(&mut self) -> Option<Outbound> {
        self.outbound.try_recv().ok()
    }

    /// Ends the inbound stream; the client's `recv` returns `None` after
    /// draining.
    pub fn close(self) {
        drop(self);
    }
}
