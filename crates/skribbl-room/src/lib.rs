//! Room state for skribbl.io clients.
//!
//! The server is authoritative; this crate keeps a local mirror of what it
//! has said so far and turns each decoded update into at most one semantic
//! event.
//!
//! # Key types
//!
//! - [`RoomState`]: the mirror (users, settings, hint, round metadata) and
//!   its reducer
//! - [`RoomEvent`]: the event vocabulary, with [`EventKind`] for filtering
//! - [`EventPublisher`]: callback and channel subscriptions
//! - [`RoomMirror`]: decode → reduce → publish for one inbound frame
//! - [`User`]: a plain snapshot of one player

mod error;
mod event;
mod mirror;
mod publisher;
mod state;
mod user;

pub use error::RoomError;
pub use event::{EventKind, Member, PodiumEntry, RoomEvent, RoomInformation};
pub use mirror::RoomMirror;
pub use publisher::{EventPublisher, SubscriptionId};
pub use state::RoomState;
pub use user::{ADMIN_FLAG, User};
