//! The semantic events produced by the reducer.

use std::collections::BTreeMap;

use skribbl_protocol::{RemovalReason, RoomId, Settings, StartGameFailReason, Stroke, UserId};

use crate::User;

/// A user referenced by an event.
///
/// The server can name a user the mirror has never seen (a message racing
/// a join, for instance); that comes through as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Known(User),
    Unknown(UserId),
}

impl Member {
    pub fn id(&self) -> UserId {
        match self {
            Self::Known(user) => user.id,
            Self::Unknown(id) => *id,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Known(user) => Some(user),
            Self::Unknown(_) => None,
        }
    }

    /// The display name, or the id when the user is not known.
    pub fn name(&self) -> String {
        match self {
            Self::Known(user) => user.name.clone(),
            Self::Unknown(id) => id.to_string(),
        }
    }
}

/// Snapshot handed out when the room information arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInformation {
    pub self_id: UserId,
    pub owner_id: Option<UserId>,
    pub room_id: RoomId,
    pub settings: Settings,
    /// Strokes already on the canvas when we joined.
    pub previous_strokes: Vec<Stroke>,
    pub current_round: u32,
    pub is_private: bool,
    /// Users in the room, ordered by id.
    pub users: Vec<User>,
}

/// One user's final placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PodiumEntry {
    pub position: u32,
    pub score: i64,
}

/// Everything a subscriber can observe.
///
/// Exactly one event per inbound message at most; state has already been
/// updated by the time an event is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    AddUser(User),
    /// `user` is the snapshot taken just before removal.
    RemoveUser {
        user: Member,
        reason: RemovalReason,
    },
    Votekick {
        voter: Member,
        target: Member,
        votes: u32,
        required: u32,
    },
    Vote {
        voter: Member,
        liked: bool,
    },
    Join(Box<RoomInformation>),
    WordChoices {
        drawer: Member,
        /// Only present for the user who has to choose.
        words: Option<Vec<String>>,
    },
    RoundStarted {
        round: u32,
    },
    ChooseWord {
        hint: String,
    },
    EndRound {
        word: String,
        /// Points earned this round per user.
        score_changes: BTreeMap<UserId, i64>,
    },
    Podium(BTreeMap<UserId, PodiumEntry>),
    EndGame,
    SettingsUpdate(Settings),
    HintReveal {
        hint: String,
    },
    CorrectGuess {
        author: Member,
        word: Option<String>,
    },
    CloseGuess {
        word: String,
    },
    NewOwner(Member),
    Draw(Vec<Stroke>),
    Clear,
    Undo {
        stroke_index: u32,
    },
    Guess {
        author: Member,
        text: String,
    },
    StartGameFail(StartGameFailReason),
    Spam,
}

/// Payload-free discriminant of [`RoomEvent`], used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AddUser,
    RemoveUser,
    Votekick,
    Vote,
    Join,
    WordChoices,
    RoundStarted,
    ChooseWord,
    EndRound,
    Podium,
    EndGame,
    SettingsUpdate,
    HintReveal,
    CorrectGuess,
    CloseGuess,
    NewOwner,
    Draw,
    Clear,
    Undo,
    Guess,
    StartGameFail,
    Spam,
}

impl RoomEvent {
    /// The kind used by [`EventPublisher::on`](crate::EventPublisher::on).
    pub fn kind(&self) -> EventKind {
        match self {
            Self::AddUser(_) => EventKind::AddUser,
            Self::RemoveUser { .. } => EventKind::RemoveUser,
            Self::Votekick { .. } => EventKind::Votekick,
            Self::Vote { .. } => EventKind::Vote,
            Self::Join(_) => EventKind::Join,
            Self::WordChoices { .. } => EventKind::WordChoices,
            Self::RoundStarted { .. } => EventKind::RoundStarted,
            Self::ChooseWord { .. } => EventKind::ChooseWord,
            Self::EndRound { .. } => EventKind::EndRound,
            Self::Podium(_) => EventKind::Podium,
            Self::EndGame => EventKind::EndGame,
            Self::SettingsUpdate(_) => EventKind::SettingsUpdate,
            Self::HintReveal { .. } => EventKind::HintReveal,
            Self::CorrectGuess { .. } => EventKind::CorrectGuess,
            Self::CloseGuess { .. } => EventKind::CloseGuess,
            Self::NewOwner(_) => EventKind::NewOwner,
            Self::Draw(_) => EventKind::Draw,
            Self::Clear => EventKind::Clear,
            Self::Undo { .. } => EventKind::Undo,
            Self::Guess { .. } => EventKind::Guess,
            Self::StartGameFail(_) => EventKind::StartGameFail,
            Self::Spam => EventKind::Spam,
        }
    }
}
