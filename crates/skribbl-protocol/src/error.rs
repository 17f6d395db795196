//! Error types for the protocol layer.
//!
//! Everything that can go wrong while turning wire data into typed values
//! (or back) ends up here. The room layer treats every variant as fatal for
//! the stream: the wire format is assumed stable, so a mismatch means the
//! client and server disagree about the protocol.

use crate::Opcode;

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serializing a frame or payload failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Parsing raw bytes into a frame failed.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// An outer update tag that the registry does not know.
    #[error("unknown update opcode {0}")]
    UnknownOpcode(Opcode),

    /// An inner game-updated tag that the registry does not know.
    #[error("unknown game-updated opcode {0}")]
    UnknownGameOpcode(Opcode),

    /// The payload does not match the schema registered for its tag.
    ///
    /// `opcode` is the registry name of the message (e.g. `"user-added"`).
    #[error("payload for {opcode} does not match its schema: {source}")]
    MalformedPayload {
        opcode: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A stroke tuple that cannot be interpreted (bad tool, missing slot).
    #[error("invalid stroke: {0}")]
    InvalidStroke(String),

    /// A settings slot or value outside what the settings array allows.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// A draw message would carry more strokes than the server accepts.
    #[error(
        "{0} strokes in one draw message, the limit is {max}",
        max = crate::MAX_STROKES_PER_PACKET
    )]
    TooManyStrokes(usize),

    /// The message is structurally valid but violates a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
