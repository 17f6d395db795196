//! The one-shot login payload sent right after the socket connects.

use serde::{Deserialize, Serialize, Serializer};

use crate::{Language, RoomId};

/// A user's avatar: four small feature codes.
///
/// On the wire it is the array `[eyes, mouth, skinColor, special]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Avatar {
    pub eyes: i32,
    pub mouth: i32,
    pub skin_color: i32,
    pub special: i32,
}

impl From<[i32; 4]> for Avatar {
    fn from([eyes, mouth, skin_color, special]: [i32; 4]) -> Self {
        Self {
            eyes,
            mouth,
            skin_color,
            special,
        }
    }
}

impl From<Avatar> for [i32; 4] {
    fn from(avatar: Avatar) -> Self {
        [avatar.eyes, avatar.mouth, avatar.skin_color, avatar.special]
    }
}

/// Which room the login asks for.
///
/// Serializes as `0` for "any public room" and as the room code otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JoinTarget {
    #[default]
    Any,
    Room(RoomId),
}

impl Serialize for JoinTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_u8(0),
            Self::Room(room) => serializer.serialize_str(&room.0),
        }
    }
}

/// `{ name, avatar, create, join, lang }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPayload {
    pub name: String,
    pub avatar: Avatar,
    /// `1` to create a private room, `0` otherwise.
    pub create: u8,
    pub join: JoinTarget,
    /// The language id, stringified.
    pub lang: String,
}

impl LoginPayload {
    /// Builds the payload; `lang` is sent as the language index string.
    pub fn new(
        name: impl Into<String>,
        avatar: Avatar,
        create: bool,
        join: JoinTarget,
        language: Language,
    ) -> Self {
        Self {
            name: name.into(),
            avatar,
            create: u8::from(create),
            join,
            lang: language.id().to_string(),
        }
    }
}
