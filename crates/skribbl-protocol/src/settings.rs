//! Room settings and their positional 8-slot wire array.
//!
//! The slot a field occupies is defined once, by [`SettingChange`]. Both the
//! full array ([`decode_settings`], [`encode_settings`]) and single-field
//! updates ([`encode_partial_update`], [`SettingChange::decode`]) go through
//! it, so the two paths cannot drift apart.
//!
//! ```text
//! slot  field
//! 0     language
//! 1     maxPlayers
//! 2     maxDrawTime (seconds)
//! 3     rounds
//! 4     wordCount
//! 5     maxHints
//! 6     wordMode
//! 7     customWordsOnly
//! ```

use serde::{Deserialize, Serialize};

use crate::{Language, ProtocolError};

/// Length of the settings array.
pub const SETTINGS_SLOTS: usize = 8;

/// The raw settings array as the server sends it.
pub type WireSettings = [i64; SETTINGS_SLOTS];

/// How the word is presented to guessers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordMode {
    #[default]
    Normal,
    Hidden,
    Combination,
    /// A wire value this client does not know.
    Unknown(i64),
}

const WORD_MODES: [WordMode; 3] = [WordMode::Normal, WordMode::Hidden, WordMode::Combination];

impl WordMode {
    /// Maps a wire id, keeping unrecognised ones as `Unknown`.
    pub fn from_id(id: i64) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|index| WORD_MODES.get(index).copied())
            .unwrap_or(Self::Unknown(id))
    }

    /// The wire id.
    pub fn id(self) -> i64 {
        match self {
            Self::Normal => 0,
            Self::Hidden => 1,
            Self::Combination => 2,
            Self::Unknown(id) => id,
        }
    }
}

/// Structured room settings.
///
/// Serializes as the positional wire array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireSettings", into = "WireSettings")]
pub struct Settings {
    pub language: Language,
    pub max_players: u32,
    /// Seconds per drawing turn.
    pub max_draw_time: u32,
    pub rounds: u32,
    /// Number of words offered to the drawer each turn.
    pub word_count: u32,
    pub max_hints: u32,
    pub word_mode: WordMode,
    pub use_custom_words_only: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::English,
            max_players: 8,
            max_draw_time: 80,
            rounds: 3,
            word_count: 3,
            max_hints: 2,
            word_mode: WordMode::Normal,
            use_custom_words_only: false,
        }
    }
}

/// A change to exactly one settings field.
///
/// The server has no multi-field update message; several changes are sent
/// as several messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Language(Language),
    MaxPlayers(u32),
    MaxDrawTime(u32),
    Rounds(u32),
    WordCount(u32),
    MaxHints(u32),
    WordMode(WordMode),
    UseCustomWordsOnly(bool),
}

impl SettingChange {
    /// The slot this field occupies in the settings array.
    pub fn slot(&self) -> usize {
        match self {
            Self::Language(_) => 0,
            Self::MaxPlayers(_) => 1,
            Self::MaxDrawTime(_) => 2,
            Self::Rounds(_) => 3,
            Self::WordCount(_) => 4,
            Self::MaxHints(_) => 5,
            Self::WordMode(_) => 6,
            Self::UseCustomWordsOnly(_) => 7,
        }
    }

    /// The wire value: enum index for language and word mode, 0/1 for the
    /// flag, the number itself otherwise.
    pub fn value(&self) -> i64 {
        match *self {
            Self::Language(language) => language.id(),
            Self::WordMode(mode) => mode.id(),
            Self::UseCustomWordsOnly(flag) => i64::from(flag),
            Self::MaxPlayers(n)
            | Self::MaxDrawTime(n)
            | Self::Rounds(n)
            | Self::WordCount(n)
            | Self::MaxHints(n) => i64::from(n),
        }
    }

    /// Interprets one `(slot, value)` pair.
    pub fn decode(slot: i64, value: i64) -> Result<Self, ProtocolError> {
        let count = || {
            u32::try_from(value).map_err(|_| {
                ProtocolError::InvalidSetting(format!("slot {slot} holds {value}"))
            })
        };
        Ok(match slot {
            0 => Self::Language(Language::from_id(value)),
            1 => Self::MaxPlayers(count()?),
            2 => Self::MaxDrawTime(count()?),
            3 => Self::Rounds(count()?),
            4 => Self::WordCount(count()?),
            5 => Self::MaxHints(count()?),
            6 => Self::WordMode(WordMode::from_id(value)),
            7 => Self::UseCustomWordsOnly(value == 1),
            _ => {
                return Err(ProtocolError::InvalidSetting(format!(
                    "no settings slot {slot}"
                )));
            }
        })
    }
}

/// Encodes a single field change as `(slot, value)`.
pub fn encode_partial_update(change: &SettingChange) -> (usize, i64) {
    (change.slot(), change.value())
}

impl Settings {
    /// Overwrites the field named by `change`.
    pub fn apply(&mut self, change: SettingChange) {
        match change {
            SettingChange::Language(v) => self.language = v,
            SettingChange::MaxPlayers(v) => self.max_players = v,
            SettingChange::MaxDrawTime(v) => self.max_draw_time = v,
            SettingChange::Rounds(v) => self.rounds = v,
            SettingChange::WordCount(v) => self.word_count = v,
            SettingChange::MaxHints(v) => self.max_hints = v,
            SettingChange::WordMode(v) => self.word_mode = v,
            SettingChange::UseCustomWordsOnly(v) => self.use_custom_words_only = v,
        }
    }

    /// Every field as a single change, in slot order.
    pub fn changes(&self) -> [SettingChange; SETTINGS_SLOTS] {
        [
            SettingChange::Language(self.language),
            SettingChange::MaxPlayers(self.max_players),
            SettingChange::MaxDrawTime(self.max_draw_time),
            SettingChange::Rounds(self.rounds),
            SettingChange::WordCount(self.word_count),
            SettingChange::MaxHints(self.max_hints),
            SettingChange::WordMode(self.word_mode),
            SettingChange::UseCustomWordsOnly(self.use_custom_words_only),
        ]
    }

    /// The changes that turn `self` into `target`, in slot order.
    pub fn diff(&self, target: &Settings) -> Vec<SettingChange> {
        self.changes()
            .into_iter()
            .zip(target.changes())
            .filter(|(ours, theirs)| ours != theirs)
            .map(|(_, theirs)| theirs)
            .collect()
    }
}

/// Decodes the full positional array.
pub fn decode_settings(raw: WireSettings) -> Result<Settings, ProtocolError> {
    let mut settings = Settings::default();
    for (slot, value) in raw.into_iter().enumerate() {
        settings.apply(SettingChange::decode(slot as i64, value)?);
    }
    Ok(settings)
}

/// Encodes the full positional array.
pub fn encode_settings(settings: &Settings) -> WireSettings {
    let mut raw = [0; SETTINGS_SLOTS];
    for change in settings.changes() {
        let (slot, value) = encode_partial_update(&change);
        raw[slot] = value;
    }
    raw
}

impl TryFrom<WireSettings> for Settings {
    type Error = ProtocolError;

    fn try_from(raw: WireSettings) -> Result<Self, Self::Error> {
        decode_settings(raw)
    }
}

impl From<Settings> for WireSettings {
    fn from(settings: Settings) -> Self {
        encode_settings(&settings)
    }
}
