//! Users as the mirror stores them.

use skribbl_protocol::{Avatar, UserId, WireUser};

/// Bit in the wire `flags` field marking a site administrator.
pub const ADMIN_FLAG: u32 = 16;

/// One player as last reported by the server.
///
/// Plain data; actions against a user go through the room, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar: Avatar,
    pub score: i64,
    pub has_guessed_correctly: bool,
    pub is_admin: bool,
}

impl From<WireUser> for User {
    fn from(user: WireUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            avatar: user.avatar,
            score: user.score,
            has_guessed_correctly: user.guessed,
            is_admin: user.flags & ADMIN_FLAG == ADMIN_FLAG,
        }
    }
}
