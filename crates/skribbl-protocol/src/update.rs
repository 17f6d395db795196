//! Inbound messages: payload schemas and the dispatch tables that decode an
//! [`Envelope`] into a typed [`Update`].
//!
//! Decoding is table driven. [`UPDATE_ROUTES`] maps each outer tag to a
//! decode function; the game-updated entry parses its wrapper and dispatches
//! again through [`GAME_ROUTES`] using the inner tag. A tag missing from its
//! table, or a payload that does not fit the schema, is a [`ProtocolError`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::opcode::{game, update};
use crate::{
    Avatar, Envelope, Opcode, ProtocolError, RoomId, SettingChange, Settings, Stroke, UserId,
};

// ---------------------------------------------------------------------------
// Wire enums
// ---------------------------------------------------------------------------

/// Why a user left the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    Disconnected,
    Kicked,
    Banned,
    Unknown(i64),
}

impl RemovalReason {
    /// Maps the wire reason code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Disconnected,
            1 => Self::Kicked,
            2 => Self::Banned,
            other => Self::Unknown(other),
        }
    }
}

/// Why the server refused to start the game.
///
/// The codes are sparse; anything else is `Unknown`, never mistaken for
/// `NotEnoughPlayers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartGameFailReason {
    NotEnoughPlayers,
    ServerRestartSoon,
    Unknown(i64),
}

impl StartGameFailReason {
    /// Maps the wire failure code.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::NotEnoughPlayers,
            100 => Self::ServerRestartSoon,
            other => Self::Unknown(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload schemas
// ---------------------------------------------------------------------------

/// A user as the server describes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireUser {
    pub id: UserId,
    pub name: String,
    pub avatar: Avatar,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub guessed: bool,
    /// Bit flags; see `ADMIN_FLAG` in the room crate.
    #[serde(default)]
    pub flags: u32,
}

/// A revealed hint letter: `(position, character)`.
pub type HintReveal = (usize, char);

/// The current word as the local user is allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WordShape {
    /// Guessers get one length per word of the phrase.
    Lengths(Vec<usize>),
    /// The drawer gets the word itself.
    Plain(String),
}

/// State of the round in progress: strokes so far, revealed letters, drawer,
/// and the word shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RoundData {
    #[serde(default, rename = "drawCommands")]
    pub draw_commands: Vec<Stroke>,
    #[serde(default)]
    pub hints: Vec<HintReveal>,
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub word: Option<WordShape>,
}

/// The game phase embedded in the room snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePhase {
    /// Inner game tag of the phase the room is in.
    pub id: Opcode,
    /// Seconds left in the phase.
    pub time: u32,
    /// Present while a round is being drawn.
    pub round: Option<RoundData>,
}

/// The full room snapshot sent once after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub settings: Settings,
    pub room_id: RoomId,
    pub is_private: bool,
    pub me: UserId,
    pub owner: Option<UserId>,
    pub users: Vec<WireUser>,
    pub round: u32,
    pub phase: GamePhase,
}

/// One line of the round results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScore {
    pub id: UserId,
    /// Total score after the round.
    pub total: i64,
    /// Points earned this round.
    pub delta: i64,
}

/// One podium entry, `[id, position, score]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "(UserId, u32, i64)")]
pub struct PodiumPlace {
    pub id: UserId,
    pub position: u32,
    pub score: i64,
}

impl From<(UserId, u32, i64)> for PodiumPlace {
    fn from((id, position, score): (UserId, u32, i64)) -> Self {
        Self {
            id,
            position,
            score,
        }
    }
}

// ---------------------------------------------------------------------------
// Decoded messages
// ---------------------------------------------------------------------------

/// A decoded server message.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    UserAdded(WireUser),
    UserRemoved {
        id: UserId,
        reason: RemovalReason,
    },
    UserVotekicked {
        voter: UserId,
        target: UserId,
        votes: u32,
        required: u32,
    },
    /// `vote` is the raw wire value, where `1` means dislike.
    UserVoted {
        id: UserId,
        vote: i64,
    },
    RoomInformation(Box<RoomSnapshot>),
    GameUpdated {
        time: Option<u32>,
        update: GameUpdate,
    },
    SettingsUpdated(SettingChange),
    HintRevealed(Vec<HintReveal>),
    TimeUpdated(u32),
    GuessedCorrectly {
        id: UserId,
        /// Only sent to the user who guessed.
        word: Option<String>,
    },
    GuessedClosely(String),
    OwnerUpdated(UserId),
    Drawn(Vec<Stroke>),
    CanvasCleared,
    Undo(u32),
    UserGuessed {
        id: UserId,
        msg: String,
    },
    StartGameFailed(StartGameFailReason),
    SpamDetected,
}

/// A decoded game-updated sub-message.
#[derive(Debug, Clone, PartialEq)]
pub enum GameUpdate {
    RoundStarted(u32),
    WordChoicesGiven {
        drawer: UserId,
        /// Only sent to the drawer.
        words: Option<Vec<String>>,
    },
    WordChosen(RoundData),
    RoundResultsShown {
        word: String,
        reason: i64,
        scores: Vec<RoundScore>,
    },
    PodiumShown(Vec<PodiumPlace>),
    GameEnded,
}

// ---------------------------------------------------------------------------
// Dispatch tables
// ---------------------------------------------------------------------------

type DecodeFn<T> = fn(&'static str, Option<Value>) -> Result<T, ProtocolError>;

/// One registry entry: a tag, its name for diagnostics, and its decoder.
pub struct Route<T: 'static> {
    pub opcode: Opcode,
    pub name: &'static str,
    decode: DecodeFn<T>,
}

/// Outer server tags.
pub static UPDATE_ROUTES: &[Route<Update>] = &[
    Route {
        opcode: update::USER_ADDED,
        name: "user-added",
        decode: |name, data| payload(name, data).map(Update::UserAdded),
    },
    Route {
        opcode: update::USER_REMOVED,
        name: "user-removed",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: UserId,
                reason: i64,
            }
            let raw: Raw = payload(name, data)?;
            Ok(Update::UserRemoved {
                id: raw.id,
                reason: RemovalReason::from_code(raw.reason),
            })
        },
    },
    Route {
        opcode: update::USER_VOTEKICKED,
        name: "user-votekicked",
        decode: |name, data| {
            let (voter, target, votes, required): (UserId, UserId, u32, u32) = payload(name, data)?;
            Ok(Update::UserVotekicked {
                voter,
                target,
                votes,
                required,
            })
        },
    },
    Route {
        opcode: update::USER_VOTED,
        name: "user-voted",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: UserId,
                vote: i64,
            }
            let raw: Raw = payload(name, data)?;
            Ok(Update::UserVoted {
                id: raw.id,
                vote: raw.vote,
            })
        },
    },
    Route {
        opcode: update::ROOM_INFORMATION,
        name: "room-information",
        decode: decode_room_information,
    },
    Route {
        opcode: update::GAME_UPDATED,
        name: "game-updated",
        decode: decode_game_updated,
    },
    Route {
        opcode: update::SETTINGS_UPDATED,
        name: "settings-updated",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: Scalar,
                val: Scalar,
            }
            let raw: Raw = payload(name, data)?;
            SettingChange::decode(raw.id.as_i64()?, raw.val.as_i64()?).map(Update::SettingsUpdated)
        },
    },
    Route {
        opcode: update::HINT_REVEALED,
        name: "hint-revealed",
        decode: |name, data| payload(name, data).map(Update::HintRevealed),
    },
    Route {
        opcode: update::TIME_UPDATED,
        name: "time-updated",
        decode: |name, data| payload(name, data).map(Update::TimeUpdated),
    },
    Route {
        opcode: update::GUESSED_CORRECTLY,
        name: "guessed-correctly",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: UserId,
                #[serde(default)]
                word: Option<String>,
            }
            let raw: Raw = payload(name, data)?;
            Ok(Update::GuessedCorrectly {
                id: raw.id,
                word: raw.word,
            })
        },
    },
    Route {
        opcode: update::GUESSED_CLOSELY,
        name: "guessed-closely",
        decode: |name, data| payload(name, data).map(Update::GuessedClosely),
    },
    Route {
        opcode: update::OWNER_UPDATED,
        name: "owner-updated",
        decode: |name, data| payload(name, data).map(Update::OwnerUpdated),
    },
    Route {
        opcode: update::DRAWN,
        name: "drawn",
        decode: |name, data| payload(name, data).map(Update::Drawn),
    },
    Route {
        opcode: update::CANVAS_CLEARED,
        name: "canvas-cleared",
        decode: |_, _| Ok(Update::CanvasCleared),
    },
    Route {
        opcode: update::UNDO,
        name: "undo",
        decode: |name, data| payload(name, data).map(Update::Undo),
    },
    Route {
        opcode: update::USER_GUESSED,
        name: "user-guessed",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: UserId,
                msg: String,
            }
            let raw: Raw = payload(name, data)?;
            Ok(Update::UserGuessed {
                id: raw.id,
                msg: raw.msg,
            })
        },
    },
    Route {
        opcode: update::START_GAME_FAILED,
        name: "start-game-failed",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: i64,
            }
            let raw: Raw = payload(name, data)?;
            Ok(Update::StartGameFailed(StartGameFailReason::from_code(raw.id)))
        },
    },
    Route {
        opcode: update::SPAM_DETECTED,
        name: "spam-detected",
        decode: |_, _| Ok(Update::SpamDetected),
    },
];

/// Inner game-updated tags.
pub static GAME_ROUTES: &[Route<GameUpdate>] = &[
    Route {
        opcode: game::ROUND_STARTED,
        name: "round-started",
        decode: |name, data| payload(name, data).map(GameUpdate::RoundStarted),
    },
    Route {
        opcode: game::WORD_CHOICES_GIVEN,
        name: "word-choices-given",
        decode: |name, data| {
            #[derive(Deserialize)]
            struct Raw {
                id: UserId,
                #[serde(default)]
                words: Option<Vec<String>>,
            }
            let raw: Raw = payload(name, data)?;
            Ok(GameUpdate::WordChoicesGiven {
                drawer: raw.id,
                words: raw.words,
            })
        },
    },
    Route {
        opcode: game::WORD_CHOSEN,
        name: "word-chosen",
        decode: |name, data| payload(name, data).map(GameUpdate::WordChosen),
    },
    Route {
        opcode: game::ROUND_RESULTS_SHOWN,
        name: "round-results-shown",
        decode: decode_round_results,
    },
    Route {
        opcode: game::PODIUM_SHOWN,
        name: "podium-shown",
        decode: |name, data| payload(name, data).map(GameUpdate::PodiumShown),
    },
    Route {
        opcode: game::GAME_ENDED,
        name: "game-ended",
        decode: |_, _| Ok(GameUpdate::GameEnded),
    },
];

/// Decodes an inbound envelope through the registry.
pub fn decode_update(envelope: Envelope) -> Result<Update, ProtocolError> {
    let route = find(UPDATE_ROUTES, envelope.id).ok_or(ProtocolError::UnknownOpcode(envelope.id))?;
    (route.decode)(route.name, envelope.data)
}

impl TryFrom<Envelope> for Update {
    type Error = ProtocolError;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        decode_update(envelope)
    }
}

/// Registry name of an outer server tag, for diagnostics.
pub fn update_name(opcode: Opcode) -> Option<&'static str> {
    find(UPDATE_ROUTES, opcode).map(|route| route.name)
}

/// Registry name of an inner game-updated tag.
pub fn game_update_name(opcode: Opcode) -> Option<&'static str> {
    find(GAME_ROUTES, opcode).map(|route| route.name)
}

fn find<T>(routes: &'static [Route<T>], opcode: Opcode) -> Option<&'static Route<T>> {
    routes.iter().find(|route| route.opcode == opcode)
}

fn payload<T: DeserializeOwned>(
    name: &'static str,
    data: Option<Value>,
) -> Result<T, ProtocolError> {
    serde_json::from_value(data.unwrap_or(Value::Null))
        .map_err(|source| ProtocolError::MalformedPayload { opcode: name, source })
}

fn decode_game_updated(name: &'static str, data: Option<Value>) -> Result<Update, ProtocolError> {
    #[derive(Deserialize)]
    struct Raw {
        #[serde(default)]
        time: Option<u32>,
        id: Opcode,
        #[serde(default)]
        data: Option<Value>,
    }
    let raw: Raw = payload(name, data)?;
    let route = find(GAME_ROUTES, raw.id).ok_or(ProtocolError::UnknownGameOpcode(raw.id))?;
    let update = (route.decode)(route.name, raw.data)?;
    Ok(Update::GameUpdated {
        time: raw.time,
        update,
    })
}

fn decode_room_information(
    name: &'static str,
    data: Option<Value>,
) -> Result<Update, ProtocolError> {
    #[derive(Deserialize)]
    struct RawPhase {
        id: Opcode,
        #[serde(default)]
        time: u32,
        #[serde(default)]
        data: Option<Value>,
    }
    #[derive(Deserialize)]
    struct Raw {
        settings: Settings,
        id: RoomId,
        #[serde(rename = "type", default)]
        kind: u8,
        me: UserId,
        #[serde(default)]
        owner: Option<i64>,
        users: Vec<WireUser>,
        #[serde(default)]
        round: u32,
        state: RawPhase,
    }
    let raw: Raw = payload(name, data)?;

    // Only a drawing turn carries round data. Other phases reuse the slot
    // for their own payload (round results also have a `word`).
    let round = match raw.state.data {
        Some(value @ Value::Object(_)) if raw.state.id == game::WORD_CHOSEN => {
            Some(payload::<RoundData>(name, Some(value))?)
        }
        _ => None,
    };

    Ok(Update::RoomInformation(Box::new(RoomSnapshot {
        settings: raw.settings,
        room_id: raw.id,
        is_private: raw.kind == 1,
        me: raw.me,
        owner: raw
            .owner
            .and_then(|owner| u32::try_from(owner).ok())
            .map(UserId),
        users: raw.users,
        round: raw.round,
        phase: GamePhase {
            id: raw.state.id,
            time: raw.state.time,
            round,
        },
    })))
}

fn decode_round_results(
    name: &'static str,
    data: Option<Value>,
) -> Result<GameUpdate, ProtocolError> {
    #[derive(Deserialize)]
    struct Raw {
        #[serde(default)]
        reason: i64,
        scores: Vec<i64>,
        word: String,
    }
    let raw: Raw = payload(name, data)?;

    if raw.scores.len() % 3 != 0 {
        return Err(ProtocolError::InvalidMessage(format!(
            "{name}: {} score values is not a multiple of 3",
            raw.scores.len()
        )));
    }
    let scores = raw
        .scores
        .chunks_exact(3)
        .map(|line| {
            let id = u32::try_from(line[0]).map_err(|_| {
                ProtocolError::InvalidMessage(format!("{name}: bad user id {}", line[0]))
            })?;
            Ok(RoundScore {
                id: UserId(id),
                total: line[1],
                delta: line[2],
            })
        })
        .collect::<Result<Vec<_>, ProtocolError>>()?;

    Ok(GameUpdate::RoundResultsShown {
        word: raw.word,
        reason: raw.reason,
        scores,
    })
}

/// A number the server sometimes sends as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    fn as_i64(&self) -> Result<i64, ProtocolError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| ProtocolError::InvalidSetting(format!("{text:?} is not a number"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Language};
    use serde_json::json;

    fn decode(value: Value) -> Result<Update, ProtocolError> {
        decode_update(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_user_added() {
        let update = decode(json!({
            "id": 1,
            "data": {
                "id": 4,
                "name": "ann",
                "avatar": [1, 2, 3, -1],
                "score": 0,
                "guessed": false,
                "flags": 16
            }
        }))
        .unwrap();
        let Update::UserAdded(user) = update else {
            panic!("expected UserAdded, got {update:?}");
        };
        assert_eq!(user.id, UserId(4));
        assert_eq!(user.avatar.special, -1);
        assert_eq!(user.flags, 16);
    }

    #[test]
    fn test_user_removed_reasons() {
        let update = decode(json!({ "id": 2, "data": { "id": 4, "reason": 2 } })).unwrap();
        assert_eq!(
            update,
            Update::UserRemoved {
                id: UserId(4),
                reason: RemovalReason::Banned
            }
        );
        let update = decode(json!({ "id": 2, "data": { "id": 4, "reason": 9 } })).unwrap();
        assert!(matches!(
            update,
            Update::UserRemoved {
                reason: RemovalReason::Unknown(9),
                ..
            }
        ));
    }

    #[test]
    fn test_votekick_is_positional() {
        let update = decode(json!({ "id": 5, "data": [1, 2, 3, 4] })).unwrap();
        assert_eq!(
            update,
            Update::UserVotekicked {
                voter: UserId(1),
                target: UserId(2),
                votes: 3,
                required: 4
            }
        );
    }

    #[test]
    fn test_outer_and_inner_tag_five_mean_different_things() {
        let outer = decode(json!({ "id": 5, "data": [1, 2, 3, 4] })).unwrap();
        assert!(matches!(outer, Update::UserVotekicked { .. }));

        let inner = decode(json!({
            "id": 11,
            "data": { "id": 5, "time": 3, "data": { "reason": 0, "scores": [], "word": "cat" } }
        }))
        .unwrap();
        assert!(matches!(
            inner,
            Update::GameUpdated {
                update: GameUpdate::RoundResultsShown { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_room_information_with_round_in_progress() {
        let update = decode(json!({
            "id": 10,
            "data": {
                "settings": [0, 8, 80, 3, 3, 2, 0, 0],
                "id": "aBc",
                "type": 1,
                "me": 2,
                "owner": 2,
                "users": [],
                "round": 1,
                "state": {
                    "id": 4,
                    "time": 60,
                    "data": {
                        "id": 3,
                        "word": [3, 2],
                        "hints": [[0, "c"]],
                        "drawCommands": [[1, 1, 5, 6, null, null, null]]
                    }
                }
            }
        }))
        .unwrap();
        let Update::RoomInformation(snapshot) = update else {
            panic!("expected RoomInformation");
        };
        assert!(snapshot.is_private);
        assert_eq!(snapshot.settings.language, Language::English);
        let round = snapshot.phase.round.unwrap();
        assert_eq!(round.word, Some(WordShape::Lengths(vec![3, 2])));
        assert_eq!(round.hints, vec![(0, 'c')]);
        assert_eq!(round.draw_commands, vec![crate::fill(Color::Black, 5, 6)]);
    }

    #[test]
    fn test_room_information_between_rounds() {
        let update = decode(json!({
            "id": 10,
            "data": {
                "settings": [0, 8, 80, 3, 3, 2, 0, 0],
                "id": "aBc",
                "type": 0,
                "me": 2,
                "owner": -1,
                "users": [],
                "round": 0,
                "state": { "id": 0, "time": 0, "data": 0 }
            }
        }))
        .unwrap();
        let Update::RoomInformation(snapshot) = update else {
            panic!("expected RoomInformation");
        };
        assert!(!snapshot.is_private);
        assert_eq!(snapshot.owner, None);
        assert_eq!(snapshot.phase.round, None);
    }

    #[test]
    fn test_room_information_in_round_results_has_no_round() {
        let update = decode(json!({
            "id": 10,
            "data": {
                "settings": [0, 8, 80, 3, 3, 2, 0, 0],
                "id": "aBc",
                "me": 2,
                "users": [],
                "round": 1,
                "state": {
                    "id": 5,
                    "time": 3,
                    "data": { "reason": 0, "scores": [1, 100, 100], "word": "cat" }
                }
            }
        }))
        .unwrap();
        let Update::RoomInformation(snapshot) = update else {
            panic!("expected RoomInformation");
        };
        assert_eq!(snapshot.phase.id, 5);
        assert_eq!(snapshot.phase.round, None);
    }

    #[test]
    fn test_drawer_sees_plain_word() {
        let update = decode(json!({
            "id": 11,
            "data": { "id": 4, "time": 80, "data": { "id": 1, "word": "cat" } }
        }))
        .unwrap();
        let Update::GameUpdated {
            update: GameUpdate::WordChosen(round),
            time,
        } = update
        else {
            panic!("expected WordChosen");
        };
        assert_eq!(time, Some(80));
        assert_eq!(round.word, Some(WordShape::Plain("cat".into())));
    }

    #[test]
    fn test_round_results_are_split_into_triples() {
        let update = decode(json!({
            "id": 11,
            "data": {
                "id": 5,
                "data": { "reason": 1, "scores": [1, 150, 50, 2, 300, 0], "word": "cat" }
            }
        }))
        .unwrap();
        let Update::GameUpdated {
            update: GameUpdate::RoundResultsShown { scores, word, reason },
            ..
        } = update
        else {
            panic!("expected RoundResultsShown");
        };
        assert_eq!(word, "cat");
        assert_eq!(reason, 1);
        assert_eq!(
            scores,
            vec![
                RoundScore { id: UserId(1), total: 150, delta: 50 },
                RoundScore { id: UserId(2), total: 300, delta: 0 },
            ]
        );
    }

    #[test]
    fn test_round_results_with_ragged_scores_is_an_error() {
        let result = decode(json!({
            "id": 11,
            "data": { "id": 5, "data": { "scores": [1, 150], "word": "cat" } }
        }));
        assert!(matches!(result, Err(ProtocolError::InvalidMessage(_))));
    }

    #[test]
    fn test_podium_entries() {
        let update = decode(json!({
            "id": 11,
            "data": { "id": 6, "data": [[1, 1, 900], [2, 2, 400]] }
        }))
        .unwrap();
        assert!(matches!(
            update,
            Update::GameUpdated {
                update: GameUpdate::PodiumShown(ref places),
                ..
            } if places[0] == PodiumPlace { id: UserId(1), position: 1, score: 900 }
        ));
    }

    #[test]
    fn test_settings_update_accepts_string_scalars() {
        let update = decode(json!({ "id": 12, "data": { "id": "6", "val": "2" } })).unwrap();
        assert_eq!(
            update,
            Update::SettingsUpdated(SettingChange::WordMode(crate::WordMode::Combination))
        );
        let update = decode(json!({ "id": 12, "data": { "id": 7, "val": 1 } })).unwrap();
        assert_eq!(update, Update::SettingsUpdated(SettingChange::UseCustomWordsOnly(true)));
    }

    #[test]
    fn test_settings_update_bad_slot_is_an_error() {
        let result = decode(json!({ "id": 12, "data": { "id": 8, "val": 1 } }));
        assert!(matches!(result, Err(ProtocolError::InvalidSetting(_))));
    }

    #[test]
    fn test_hint_pairs() {
        let update = decode(json!({ "id": 13, "data": [[0, "c"], [4, "a"]] })).unwrap();
        assert_eq!(update, Update::HintRevealed(vec![(0, 'c'), (4, 'a')]));
    }

    #[test]
    fn test_start_game_failed_reasons() {
        let update = decode(json!({ "id": 31, "data": { "id": 100 } })).unwrap();
        assert_eq!(update, Update::StartGameFailed(StartGameFailReason::ServerRestartSoon));
        let update = decode(json!({ "id": 31, "data": { "id": 7, "data": 3 } })).unwrap();
        assert_eq!(update, Update::StartGameFailed(StartGameFailReason::Unknown(7)));
    }

    #[test]
    fn test_payloadless_messages() {
        assert_eq!(decode(json!({ "id": 20 })).unwrap(), Update::CanvasCleared);
        assert_eq!(decode(json!({ "id": 32 })).unwrap(), Update::SpamDetected);
        let ended = decode(json!({ "id": 11, "data": { "id": 7, "data": 0 } })).unwrap();
        assert!(matches!(
            ended,
            Update::GameUpdated {
                update: GameUpdate::GameEnded,
                time: None
            }
        ));
    }

    #[test]
    fn test_unknown_outer_opcode_is_an_error() {
        let result = decode(json!({ "id": 99, "data": 1 }));
        assert!(matches!(result, Err(ProtocolError::UnknownOpcode(99))));
    }

    #[test]
    fn test_unknown_inner_opcode_is_an_error() {
        let result = decode(json!({ "id": 11, "data": { "id": 42 } }));
        assert!(matches!(result, Err(ProtocolError::UnknownGameOpcode(42))));
    }

    #[test]
    fn test_shape_mismatch_names_the_opcode() {
        let err = decode(json!({ "id": 30, "data": "just a string" })).unwrap_err();
        match err {
            ProtocolError::MalformedPayload { opcode, .. } => assert_eq!(opcode, "user-guessed"),
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_route_names() {
        assert_eq!(update_name(19), Some("drawn"));
        assert_eq!(game_update_name(3), Some("word-choices-given"));
        assert_eq!(update_name(3), None);
    }

    #[test]
    fn test_tables_have_no_duplicate_tags() {
        let mut outer: Vec<_> = UPDATE_ROUTES.iter().map(|r| r.opcode).collect();
        outer.sort_unstable();
        outer.dedup();
        assert_eq!(outer.len(), UPDATE_ROUTES.len());

        let mut inner: Vec<_> = GAME_ROUTES.iter().map(|r| r.opcode).collect();
        inner.sort_unstable();
        inner.dedup();
        assert_eq!(inner.len(), GAME_ROUTES.len());
    }
}
