//! The opcode registry: every numeric tag the protocol uses.
//!
//! Three numbering spaces exist and must not be mixed:
//!
//! - [`update`]: outer tags on messages from the server
//! - [`game`]: inner tags nested inside an [`update::GAME_UPDATED`] message
//! - [`action`]: outer tags on messages from the client
//!
//! The numbers are fixed by the server. Some values appear in more than one
//! space with different meanings (outer `5` is a votekick, inner `5` is the
//! round results), which is why the payload schemas are looked up per space
//! in [`crate::update`] and [`crate::action`].

use crate::Opcode;

/// Server → client outer tags.
pub mod update {
    use super::Opcode;

    /// A user joined the room.
    pub const USER_ADDED: Opcode = 1;
    /// A user left, was kicked, or was banned.
    pub const USER_REMOVED: Opcode = 2;
    /// Someone voted to kick the current drawer.
    pub const USER_VOTEKICKED: Opcode = 5;
    /// Someone liked or disliked the drawing.
    pub const USER_VOTED: Opcode = 8;
    /// Full room snapshot, sent once after login.
    pub const ROOM_INFORMATION: Opcode = 10;
    /// Wrapper for the nested [`game`](super::game) messages.
    pub const GAME_UPDATED: Opcode = 11;
    /// One settings slot changed.
    pub const SETTINGS_UPDATED: Opcode = 12;
    /// Letters of the hint were revealed.
    pub const HINT_REVEALED: Opcode = 13;
    /// The round timer was corrected.
    pub const TIME_UPDATED: Opcode = 14;
    /// A user guessed the word.
    pub const GUESSED_CORRECTLY: Opcode = 15;
    /// The local user's guess was close.
    pub const GUESSED_CLOSELY: Opcode = 16;
    /// The room owner changed.
    pub const OWNER_UPDATED: Opcode = 17;
    /// Strokes were drawn.
    pub const DRAWN: Opcode = 19;
    /// The canvas was cleared.
    pub const CANVAS_CLEARED: Opcode = 20;
    /// A stroke was undone.
    /// Roll back to a stroke index.
    pub const UNDO: Opcode = 21;
    /// A chat message or wrong guess.
    pub const USER_GUESSED: Opcode = 30;
    /// The owner tried to start the game and the server refused.
    pub const START_GAME_FAILED: Opcode = 31;
    /// The local user is sending messages too quickly.
    pub const SPAM_DETECTED: Opcode = 32;
}

/// Inner tags of a game-updated message.
pub mod game {
    use super::Opcode;

    /// A new round began.
    pub const ROUND_STARTED: Opcode = 2;
    /// The drawer is choosing a word.
    pub const WORD_CHOICES_GIVEN: Opcode = 3;
    /// The drawing turn started; carries the hint shape.
    pub const WORD_CHOSEN: Opcode = 4;
    /// The turn ended with the word and score lines.
    pub const ROUND_RESULTS_SHOWN: Opcode = 5;
    /// Final placements.
    pub const PODIUM_SHOWN: Opcode = 6;
    /// Back to the lobby.
    pub const GAME_ENDED: Opcode = 7;
}

/// Client → server outer tags.
pub mod action {
    use super::Opcode;

    /// Owner only.
    pub const KICK_USER: Opcode = 3;
    /// Owner only.
    pub const BAN_USER: Opcode = 4;
    /// Vote to kick the drawer.
    pub const VOTEKICK_USER: Opcode = 5;
    /// Report with a reason bitmask.
    pub const REPORT_USER: Opcode = 6;
    /// Mute a user's chat.
    pub const MUTE_USER: Opcode = 7;
    /// Like (`1`) or dislike (`0`) the drawing.
    pub const VOTE: Opcode = 8;
    /// Change one settings slot.
    pub const UPDATE_SETTINGS: Opcode = 12;
    /// Pick one of the offered words by index.
    pub const CHOOSE_WORD: Opcode = 18;
    /// Up to eight strokes.
    pub const DRAW: Opcode = 19;
    /// Wipe the canvas.
    pub const CLEAR_CANVAS: Opcode = 20;
    pub const UNDO: Opcode = 21;
    /// Start with optional custom words.
    pub const START_GAME: Opcode = 22;
    /// Abort the running game.
    pub const END_GAME: Opcode = 23;
    /// Chat message or guess.
    pub const GUESS: Opcode = 30;
}
