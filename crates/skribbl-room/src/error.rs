//! Error types for the room layer.

use skribbl_protocol::ProtocolError;

/// Errors that stop a [`RoomMirror`](crate::RoomMirror).
///
/// All of them are fatal: once one is returned the mirror refuses further
/// input with [`RoomError::Halted`].
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// An inbound message did not match the registry.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server rejected the login.
    #[error("server rejected the join (reason {reason})")]
    JoinFailed { reason: i64 },

    /// A previous fatal error stopped the stream.
    #[error("room stream halted after a fatal error")]
    Halted,
}
