//! Unified error type for the skribbl client.

use skribbl_protocol::ProtocolError;
use skribbl_room::RoomError;
use skribbl_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum SkribblError {
    /// The connection failed or closed under us.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An outbound action could not be encoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The inbound stream hit a fatal condition (join rejected, protocol
    /// mismatch).
    #[error(transparent)]
    Room(#[from] RoomError),
}
