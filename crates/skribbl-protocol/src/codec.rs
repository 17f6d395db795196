//! Byte-level framing for transports that carry text or binary payloads.
//!
//! The room logic works on typed frames ([`Inbound`](crate::Inbound),
//! [`Outbound`](crate::Outbound)). A transport that only moves bytes (a
//! line-oriented pipe, a recorded capture) uses a [`Codec`] at its edge.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts values to bytes and back.
///
/// `Send + Sync + 'static` so a codec can live inside a spawned task.
pub trait Codec: Send + Sync + 'static {
    /// # Errors
    /// `ProtocolError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// # Errors
    /// `ProtocolError::Decode` if the bytes are malformed or do not match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// JSON, the format the game server speaks.
///
/// ```rust
/// use skribbl_protocol::{Codec, Envelope, Inbound, JsonCodec};
///
/// let codec = JsonCodec;
/// let frame: Inbound = codec.decode(br#"{"data":{"id":20}}"#).unwrap();
/// assert_eq!(frame, Inbound::Data(Envelope::bare(20)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
