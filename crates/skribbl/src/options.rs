//! Connection-time options and the login payload built from them.

use skribbl_protocol::{Avatar, JoinTarget, Language, LoginPayload, RoomId};

/// Who we are and which room we want.
///
/// ```rust
/// use skribbl::{Language, RoomOptions};
///
/// let options = RoomOptions::new("bot")
///     .with_language(Language::German)
///     .join_room("aBcD1234");
/// assert_eq!(options.login_payload().lang, "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomOptions {
    /// Display name. Empty lets the server pick one.
    pub username: String,
    pub avatar: Avatar,
    pub language: Language,
    /// Create a new private room instead of joining.
    pub create: bool,
    /// Room code to join; `None` joins any public room.
    pub room_id: Option<RoomId>,
}

impl RoomOptions {
    /// Options for joining any public room as `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Sets the avatar.
    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.avatar = avatar;
        self
    }

    /// Sets the room language to join or create.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Asks the server for a fresh private room.
    pub fn create_room(mut self) -> Self {
        self.create = true;
        self.room_id = None;
        self
    }

    /// Joins the room with this code.
    pub fn join_room(mut self, code: impl Into<String>) -> Self {
        self.create = false;
        self.room_id = Some(RoomId(code.into()));
        self
    }

    /// The payload [`Room::connect`](crate::Room::connect) sends.
    pub fn login_payload(&self) -> LoginPayload {
        let join = match &self.room_id {
            Some(room) => JoinTarget::Room(room.clone()),
            None => JoinTarget::Any,
        };
        LoginPayload::new(self.username.clone(), self.avatar, self.create, join, self.language)
    }
}
