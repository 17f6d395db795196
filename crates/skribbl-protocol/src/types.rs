//! Core protocol types for the skribbl.io wire format.
//!
//! Every message travelling between client and server, in either
//! direction, is an [`Envelope`]: a numeric opcode plus an optional JSON
//! payload whose shape depends on that opcode. Envelopes themselves ride
//! inside transport [frames](Inbound) named after the socket events the
//! server uses (`data`, `joinerr`, `login`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::LoginPayload;

/// A numeric message tag.
///
/// Two independent numbering spaces exist: outer update/action tags and the
/// inner tags nested inside a game-updated message. See [`crate::opcode`].
pub type Opcode = u32;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A user's id, assigned by the server and unique within a room.
///
/// `#[serde(transparent)]` keeps it a plain number on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A room's public code, the part after `?` in an invite link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The `{ id, data? }` wrapper shared by every message.
///
/// The same shape is used one level deeper for game-updated sub-messages.
/// `data` is kept as raw JSON here; the registry in [`crate::update`]
/// decides what it must look like for a given `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The opcode.
    pub id: Opcode,

    /// The opcode-specific payload. Absent for payload-less messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// An envelope carrying a payload.
    pub fn new(id: Opcode, data: Value) -> Self {
        Self {
            id,
            data: Some(data),
        }
    }

    /// An envelope with no payload (e.g. clear canvas).
    pub fn bare(id: Opcode) -> Self {
        Self { id, data: None }
    }

    /// Returns `true` if this envelope carries the given tag.
    ///
    /// This is the narrowing check used to discriminate envelopes before
    /// their payload is decoded.
    pub fn is(&self, id: Opcode) -> bool {
        self.id == id
    }
}

/// Free-function form of [`Envelope::is`].
pub fn is_opcode(envelope: &Envelope, id: Opcode) -> bool {
    envelope.is(id)
}

// ---------------------------------------------------------------------------
// Transport frames
// ---------------------------------------------------------------------------

/// A frame arriving from the server.
///
/// Externally tagged with the socket event name:
/// `{"data": {"id": 1, "data": {...}}}` or `{"joinerr": 1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inbound {
    /// A regular update message.
    #[serde(rename = "data")]
    Data(Envelope),

    /// The server rejected the login. Carries the server's reason code.
    #[serde(rename = "joinerr")]
    JoinError(i64),
}

/// A frame sent to the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outbound {
    /// The one-shot login sent right after connecting.
    #[serde(rename = "login")]
    Login(LoginPayload),

    /// A player action.
    #[serde(rename = "data")]
    Data(Envelope),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId(7).to_string(), "U-7");
    }

    #[test]
    fn test_room_id_is_a_plain_string() {
        let json = serde_json::to_string(&RoomId::from("aBcD1234")).unwrap();
        assert_eq!(json, "\"aBcD1234\"");
    }

    #[test]
    fn test_envelope_without_data_omits_field() {
        let json = serde_json::to_value(Envelope::bare(20)).unwrap();
        assert_eq!(json, json!({ "id": 20 }));
    }

    #[test]
    fn test_envelope_missing_data_decodes_as_none() {
        let env: Envelope = serde_json::from_value(json!({ "id": 32 })).unwrap();
        assert_eq!(env.id, 32);
        assert!(env.data.is_none());
    }

    #[test]
    fn test_is_opcode_discriminates_by_id() {
        let env = Envelope::new(16, json!("apple"));
        assert!(is_opcode(&env, 16));
        assert!(!env.is(15));
    }

    #[test]
    fn test_inbound_frames_use_socket_event_names() {
        let frame: Inbound =
            serde_json::from_value(json!({ "data": { "id": 20 } })).unwrap();
        assert_eq!(frame, Inbound::Data(Envelope::bare(20)));

        let frame: Inbound = serde_json::from_value(json!({ "joinerr": 2 })).unwrap();
        assert_eq!(frame, Inbound::JoinError(2));
    }

    #[test]
    fn test_outbound_data_frame_shape() {
        let frame = Outbound::Data(Envelope::new(30, json!("hello")));
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json, json!({ "data": { "id": 30, "data": "hello" } }));
    }

    #[test]
    fn test_envelope_without_id_is_rejected() {
        let result: Result<Envelope, _> = serde_json::from_value(json!({ "data": 1 }));
        assert!(result.is_err());
    }
}
