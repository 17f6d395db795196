//! Outbound actions: what the client can ask the server to do.

use serde_json::{Value, json};

use crate::opcode::action;
use crate::{Envelope, MAX_STROKES_PER_PACKET, Opcode, ProtocolError, SettingChange, Stroke, UserId};

/// Reasons accepted by the report action. Sent as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportReason {
    InappropriateMessagesOrDrawings = 0,
    Spam = 1,
    BottingOrCheating = 2,
}

impl ReportReason {
    /// This reason's bit in the report mask.
    pub fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// ORs the reasons into the wire mask. Duplicates are harmless.
pub fn report_mask(reasons: &[ReportReason]) -> u32 {
    reasons.iter().fold(0, |mask, reason| mask | reason.bit())
}

/// A client to server message.
///
/// Permission rules (owner only, drawer only) are enforced by the server;
/// nothing here checks them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    KickUser(UserId),
    BanUser(UserId),
    VotekickUser(UserId),
    ReportUser {
        user: UserId,
        reasons: Vec<ReportReason>,
    },
    /// Accepted by the server but has no visible effect.
    MuteUser(UserId),
    /// `true` likes the current drawing.
    Vote(bool),
    UpdateSetting(SettingChange),
    /// Index into the offered word choices.
    ChooseWord(usize),
    /// At most [`MAX_STROKES_PER_PACKET`] strokes.
    Draw(Vec<Stroke>),
    ClearCanvas,
    /// Stroke index to roll back to.
    Undo(u32),
    StartGame {
        custom_words: Vec<String>,
    },
    EndGame,
    Guess(String),
}

impl Action {
    /// The outer tag this action is sent under.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::KickUser(_) => action::KICK_USER,
            Self::BanUser(_) => action::BAN_USER,
            Self::VotekickUser(_) => action::VOTEKICK_USER,
            Self::ReportUser { .. } => action::REPORT_USER,
            Self::MuteUser(_) => action::MUTE_USER,
            Self::Vote(_) => action::VOTE,
            Self::UpdateSetting(_) => action::UPDATE_SETTINGS,
            Self::ChooseWord(_) => action::CHOOSE_WORD,
            Self::Draw(_) => action::DRAW,
            Self::ClearCanvas => action::CLEAR_CANVAS,
            Self::Undo(_) => action::UNDO,
            Self::StartGame { .. } => action::START_GAME,
            Self::EndGame => action::END_GAME,
            Self::Guess(_) => action::GUESS,
        }
    }

    /// Builds the `{ id, data? }` envelope for this action.
    pub fn to_envelope(&self) -> Result<Envelope, ProtocolError> {
        let id = self.opcode();
        let data: Option<Value> = match self {
            Self::KickUser(user)
            | Self::BanUser(user)
            | Self::VotekickUser(user)
            | Self::MuteUser(user) => Some(json!(user)),
            Self::ReportUser { user, reasons } => Some(json!({
                "id": user,
                "reason": report_mask(reasons),
            })),
            Self::Vote(like) => Some(json!(u8::from(*like))),
            Self::UpdateSetting(change) => {
                let (slot, value) = crate::encode_partial_update(change);
                // The server expects slot 7 as a number and every other slot as a string.
                let slot = if slot == 7 {
                    json!(slot)
                } else {
                    json!(slot.to_string())
                };
                Some(json!({ "id": slot, "val": value.to_string() }))
            }
            Self::ChooseWord(index) => Some(json!(index)),
            Self::Draw(strokes) => {
                if strokes.len() > MAX_STROKES_PER_PACKET {
                    return Err(ProtocolError::TooManyStrokes(strokes.len()));
                }
                Some(serde_json::to_value(strokes).map_err(ProtocolError::Encode)?)
            }
            Self::Undo(index) => Some(json!(index)),
            Self::StartGame { custom_words } => Some(json!(custom_words.join(","))),
            Self::Guess(text) => Some(json!(text)),
            Self::ClearCanvas | Self::EndGame => None,
        };
        Ok(Envelope { id, data })
    }
}

impl TryFrom<&Action> for Envelope {
    type Error = ProtocolError;

    fn try_from(action: &Action) -> Result<Self, Self::Error> {
        action.to_envelope()
    }
}
