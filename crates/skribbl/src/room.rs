//! The room client: one connection, one mirror, one event stream.

use skribbl_protocol::{Action, Outbound, SettingChange, Settings, UserId};
use skribbl_room::{EventPublisher, RoomEvent, RoomMirror, RoomState};
use skribbl_transport::{Connection, ConnectionId};

use crate::{Canvas, RoomOptions, SkribblError, UserActions};

/// A joined (or joining) room over connection `C`.
///
/// Inbound frames are processed one at a time by [`next_event`] or [`run`];
/// subscribers registered through [`events`] run synchronously inside those
/// calls. Actions are sent straight to the connection.
///
/// [`next_event`]: Room::next_event
/// [`run`]: Room::run
/// [`events`]: Room::events
pub struct Room<C: Connection> {
    conn: C,
    mirror: RoomMirror,
    options: RoomOptions,
}

impl<C: Connection> Room<C> {
    /// Sends the login payload and returns the room, before any inbound
    /// frame has been read.
    pub async fn connect(conn: C, options: RoomOptions) -> Result<Self, SkribblError> {
        let login = options.login_payload();
        tracing::info!(
            conn = %conn.id(),
            name = %login.name,
            create = options.create,
            room = ?options.room_id,
            "sending login"
        );
        conn.send(Outbound::Login(login)).await?;

        Ok(Self {
            conn,
            mirror: RoomMirror::new(),
            options,
        })
    }

    /// Id of the underlying connection.
    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    pub fn options(&self) -> &RoomOptions {
        &self.options
    }

    /// Read-only view of the mirror.
    pub fn state(&self) -> &RoomState {
        self.mirror.state()
    }

    /// Subscription surface.
    pub fn events(&mut self) -> &mut EventPublisher {
        self.mirror.events()
    }

    /// Reads frames until one produces an event.
    ///
    /// Returns `Ok(None)` once the connection closes. Fatal stream errors
    /// (join rejected, protocol mismatch) are returned as errors and every
    /// later call fails as well.
    pub async fn next_event(&mut self) -> Result<Option<RoomEvent>, SkribblError> {
        loop {
            let Some(frame) = self.conn.recv().await? else {
                tracing::info!(conn = %self.conn.id(), "connection closed");
                return Ok(None);
            };
            if let Some(event) = self.mirror.handle(frame)? {
                return Ok(Some(event));
            }
        }
    }

    /// Processes frames until the connection closes, delivering every event
    /// to subscribers.
    pub async fn run(&mut self) -> Result<(), SkribblError> {
        while self.next_event().await?.is_some() {}
        Ok(())
    }

    /// Encodes and sends one action.
    pub async fn send(&self, action: Action) -> Result<(), SkribblError> {
        let envelope = action.to_envelope()?;
        tracing::debug!(conn = %self.conn.id(), opcode = envelope.id, "sending action");
        self.conn.send(Outbound::Data(envelope)).await?;
        Ok(())
    }

    /// Sends a guess or chat line.
    pub async fn guess(&self, text: impl Into<String>) -> Result<(), SkribblError> {
        self.send(Action::Guess(text.into())).await
    }

    /// Likes (`true`) or dislikes the current drawing.
    pub async fn vote(&self, like: bool) -> Result<(), SkribblError> {
        self.send(Action::Vote(like)).await
    }

    /// Picks one of the words offered to the drawer.
    pub async fn choose_word(&self, index: usize) -> Result<(), SkribblError> {
        self.send(Action::ChooseWord(index)).await
    }

    /// Owner only. An empty word list uses the built-in words.
    pub async fn start_game<I, S>(&self, custom_words: I) -> Result<(), SkribblError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let custom_words = custom_words.into_iter().map(Into::into).collect();
        self.send(Action::StartGame { custom_words }).await
    }

    /// Owner only.
    pub async fn end_game(&self) -> Result<(), SkribblError> {
        self.send(Action::EndGame).await
    }

    /// Sends one settings message per change. Returns how many were sent.
    pub async fn update_settings<I>(&self, changes: I) -> Result<usize, SkribblError>
    where
        I: IntoIterator<Item = SettingChange>,
    {
        let mut sent = 0;
        for change in changes {
            self.send(Action::UpdateSetting(change)).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Sends only the fields where `target` differs from the mirrored
    /// settings; every field when nothing is mirrored yet.
    pub async fn update_settings_to(&self, target: &Settings) -> Result<usize, SkribblError> {
        let changes = match self.state().settings() {
            Some(current) => current.diff(target),
            None => target.changes().to_vec(),
        };
        self.update_settings(changes).await
    }

    /// Drawing actions for this room.
    pub fn canvas(&self) -> Canvas<'_, C> {
        Canvas::new(self)
    }

    /// Actions targeting one user.
    pub fn user(&self, id: UserId) -> UserActions<'_, C> {
        UserActions::new(self, id)
    }

    /// Closes the connection.
    pub async fn disconnect(self) -> Result<(), SkribblError> {
        tracing::info!(conn = %self.conn.id(), "disconnecting");
        self.conn.close().await?;
        Ok(())
    }
}
