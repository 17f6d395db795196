//! # skribbl
//!
//! Client library for skribbl.io rooms.
//!
//! A [`Room`] wraps a [`Connection`], keeps a local mirror of the room
//! state, and turns server messages into [`RoomEvent`]s. Actions (guesses,
//! drawing, settings, moderation) are sent back through the same room.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skribbl::prelude::*;
//!
//! # async fn demo() -> Result<(), SkribblError> {
//! let (conn, _server) = skribbl::transport::channel();
//! let mut room = Room::connect(conn, RoomOptions::new("bot")).await?;
//! while let Some(event) = room.next_event().await? {
//!     if let RoomEvent::Guess { author, text } = event {
//!         println!("{}: {text}", author.name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod canvas;
mod error;
mod options;
mod room;
mod user;

pub use canvas::Canvas;
pub use error::SkribblError;
pub use options::RoomOptions;
pub use room::Room;
pub use user::UserActions;

pub use skribbl_protocol as protocol;
pub use skribbl_room as state;
pub use skribbl_transport as transport;

pub use skribbl_protocol::{
    Action, Avatar, Color, Language, ReportReason, SettingChange, Settings, Stroke, UserId,
    WordMode,
};
pub use skribbl_room::{EventKind, Member, RoomEvent, RoomState, User};
pub use skribbl_transport::Connection;

pub mod prelude {
    pub use crate::{
        Avatar, Canvas, Color, Connection, EventKind, Language, Member, ReportReason, Room,
        RoomEvent, RoomOptions, SettingChange, Settings, SkribblError, Stroke, User, UserActions,
        UserId, WordMode,
    };
}
