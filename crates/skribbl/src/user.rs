//! Per-user actions: kick, ban, votekick, report and mute.

use skribbl_protocol::{Action, ReportReason, UserId};
use skribbl_room::User;
use skribbl_transport::Connection;

use crate::{Room, SkribblError};

/// Actions against one user; see [`Room::user`].
///
/// Kick and ban are owner only, votekick targets the current drawer. The
/// server enforces both.
pub struct UserActions<'a, C: Connection> {
    room: &'a Room<C>,
    id: UserId,
}

impl<'a, C: Connection> UserActions<'a, C> {
    pub(crate) fn new(room: &'a Room<C>, id: UserId) -> Self {
        Self { room, id }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// The mirrored user, if known.
    pub fn user(&self) -> Option<&'a User> {
        self.room.state().user(self.id)
    }

    /// Kicks the user from a private room.
    pub async fn kick(&self) -> Result<(), SkribblError> {
        self.room.send(Action::KickUser(self.id)).await
    }

    /// Bans the user from a private room.
    pub async fn ban(&self) -> Result<(), SkribblError> {
        self.room.send(Action::BanUser(self.id)).await
    }

    /// Votes to kick the user.
    pub async fn votekick(&self) -> Result<(), SkribblError> {
        self.room.send(Action::VotekickUser(self.id)).await
    }

    /// Reports the user; the reasons are combined into one bitmask.
    pub async fn report(&self, reasons: &[ReportReason]) -> Result<(), SkribblError> {
        self.room
            .send(Action::ReportUser {
                user: self.id,
                reasons: reasons.to_vec(),
            })
            .await
    }

    /// Accepted by the server but has no visible effect.
    pub async fn mute(&self) -> Result<(), SkribblError> {
        self.room.send(Action::MuteUser(self.id)).await
    }
}
