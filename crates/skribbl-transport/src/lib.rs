//! Transport abstraction for skribbl.io clients.
//!
//! A [`Connection`] is the room's only view of the network: a source of
//! [`Inbound`] frames and a sink for [`Outbound`] ones. Establishing the
//! connection (socket handshake, reconnects) happens outside this crate.
//!
//! Two implementations ship here:
//!
//! - [`channel`]: an in-memory pair for tests and embedding
//! - [`JsonLinesConnection`]: one JSON frame per line over any async
//!   byte stream

#![allow(async_fn_in_trait)]

mod channel;
mod error;
mod lines;

pub use channel::{ChannelConnection, ChannelPeer, channel};
pub use error::TransportError;
pub use lines::JsonLinesConnection;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use skribbl_protocol::{Inbound, Outbound};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// A process-unique id.
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// One established connection to the game server.
pub trait Connection: Send + Sync + 'static {
    /// Sends a frame to the server.
    async fn send(&self, frame: Outbound) -> Result<(), TransportError>;

    /// Receives the next frame.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Inbound>, TransportError>;

    /// Closes the connection. Later sends fail; frames already buffered
    /// may still be received.
    async fn close(&self) -> Result<(), TransportError>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
