//! Wire protocol for the skribbl.io game server.
//!
//! This crate knows what travels on the socket and nothing about rooms:
//!
//! - **Types** ([`Envelope`], [`Inbound`], [`Outbound`], [`UserId`]) and the
//!   numeric tags in [`opcode`].
//! - **Registry** ([`decode_update`], [`Update`], [`GameUpdate`]): the
//!   tag-to-schema tables for server messages.
//! - **Actions** ([`Action`]): client messages and their payload encoding.
//! - **Codecs** for the compact stroke tuples ([`Stroke`]) and the
//!   positional settings array ([`Settings`]).
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (frames) → Protocol (Update) → Room (state + events)
//! ```

mod action;
mod canvas;
mod codec;
mod error;
mod language;
mod login;
pub mod opcode;
mod settings;
mod types;
mod update;

pub use action::{Action, ReportReason, report_mask};
pub use canvas::{
    Color, MAX_STROKES_PER_PACKET, PALETTE, STROKE_SLOTS, Stroke, Tool, WireStroke, decode_stroke,
    encode_stroke, fill, line, packets, polygon, rectangle,
};
pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use language::{LANGUAGES, Language};
pub use login::{Avatar, JoinTarget, LoginPayload};
pub use settings::{
    SETTINGS_SLOTS, SettingChange, Settings, WireSettings, WordMode, decode_settings,
    encode_partial_update, encode_settings,
};
pub use types::{Envelope, Inbound, Opcode, Outbound, RoomId, UserId, is_opcode};
pub use update::{
    GAME_ROUTES, GamePhase, GameUpdate, HintReveal, PodiumPlace, RemovalReason, RoomSnapshot,
    Route, RoundData, RoundScore, StartGameFailReason, UPDATE_ROUTES, Update, WireUser,
    WordShape, decode_update, game_update_name, update_name,
};
