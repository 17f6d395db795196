//! The room mirror and its reducer.
//!
//! [`RoomState::reduce`] applies one decoded [`Update`] and returns the
//! event it implies. The mutation always happens first, so anything reading
//! the state while handling the event sees the post-update values.

use std::collections::HashMap;

use skribbl_protocol::{
    GameUpdate, HintReveal, RoomId, RoomSnapshot, RoundData, Settings, Update, UserId, WordShape,
};

use crate::{Member, PodiumEntry, RoomEvent, RoomInformation, User};

/// Local copy of the server's room state.
///
/// Empty until the room information message arrives. Handed out by
/// reference only; events carry owned snapshots.
#[derive(Debug, Clone, Default)]
pub struct RoomState {
    self_id: Option<UserId>,
    room_id: Option<RoomId>,
    owner_id: Option<UserId>,
    users: HashMap<UserId, User>,
    settings: Option<Settings>,
    /// `_` for hidden letters, words separated by single spaces.
    hint: String,
    current_round: u32,
    is_private: bool,
    drawer_id: Option<UserId>,
}

impl RoomState {
    /// An empty, not yet joined state.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the room information has been applied.
    pub fn is_joined(&self) -> bool {
        self.settings.is_some()
    }

    /// The local user.
    pub fn self_id(&self) -> Option<UserId> {
        self.self_id
    }

    /// Code of the joined room.
    pub fn room_id(&self) -> Option<&RoomId> {
        self.room_id.as_ref()
    }

    /// Owner of a private room. Public rooms have none.
    pub fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    /// Looks up a user by id.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Users in no particular order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Current settings, `None` before join.
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    /// The word hint, empty when no round is active.
    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    /// The user drawing this turn, if a turn is in progress.
    pub fn drawer_id(&self) -> Option<UserId> {
        self.drawer_id
    }

    /// Applies one update and returns the event it produces.
    ///
    /// Never fails: ids the mirror does not know become [`Member::Unknown`]
    /// and out-of-range hint positions are skipped.
    pub fn reduce(&mut self, update: Update) -> Option<RoomEvent> {
        match update {
            Update::UserAdded(wire) => {
                let user = User::from(wire);
                tracing::debug!(user_id = %user.id, name = %user.name, "user added");
                self.users.insert(user.id, user.clone());
                Some(RoomEvent::AddUser(user))
            }
            Update::UserRemoved { id, reason } => {
                let user = match self.users.remove(&id) {
                    Some(user) => Member::Known(user),
                    None => {
                        tracing::warn!(user_id = %id, "removal of unknown user");
                        Member::Unknown(id)
                    }
                };
                tracing::debug!(user_id = %id, ?reason, "user removed");
                Some(RoomEvent::RemoveUser { user, reason })
            }
            Update::UserVotekicked {
                voter,
                target,
                votes,
                required,
            } => Some(RoomEvent::Votekick {
                voter: self.member(voter),
                target: self.member(target),
                votes,
                required,
            }),
            // The server sends 1 for a dislike.
            Update::UserVoted { id, vote } => Some(RoomEvent::Vote {
                voter: self.member(id),
                liked: vote == 0,
            }),
            Update::RoomInformation(snapshot) => Some(self.join(*snapshot)),
            Update::GameUpdated { update, .. } => self.reduce_game(update),
            Update::SettingsUpdated(change) => match self.settings.as_mut() {
                Some(settings) => {
                    settings.apply(change);
                    tracing::debug!(
                        slot = change.slot(),
                        value = change.value(),
                        "setting updated"
                    );
                    Some(RoomEvent::SettingsUpdate(settings.clone()))
                }
                None => {
                    tracing::warn!(slot = change.slot(), "settings update before join, ignored");
                    None
                }
            },
            Update::HintRevealed(reveals) => {
                apply_reveals(&mut self.hint, &reveals);
                tracing::debug!(hint = %self.hint, "hint revealed");
                Some(RoomEvent::HintReveal {
                    hint: self.hint.clone(),
                })
            }
            Update::TimeUpdated(seconds) => {
                tracing::trace!(seconds, "time updated");
                None
            }
            Update::GuessedCorrectly { id, word } => {
                if let Some(user) = self.users.get_mut(&id) {
                    user.has_guessed_correctly = true;
                }
                Some(RoomEvent::CorrectGuess {
                    author: self.member(id),
                    word,
                })
            }
            Update::GuessedClosely(word) => Some(RoomEvent::CloseGuess { word }),
            Update::OwnerUpdated(id) => {
                self.owner_id = Some(id);
                tracing::debug!(owner_id = %id, "owner updated");
                Some(RoomEvent::NewOwner(self.member(id)))
            }
            Update::Drawn(strokes) => Some(RoomEvent::Draw(strokes)),
            Update::CanvasCleared => Some(RoomEvent::Clear),
            Update::Undo(stroke_index) => Some(RoomEvent::Undo { stroke_index }),
            Update::UserGuessed { id, msg } => Some(RoomEvent::Guess {
                author: self.member(id),
                text: msg,
            }),
            Update::StartGameFailed(reason) => Some(RoomEvent::StartGameFail(reason)),
            Update::SpamDetected => Some(RoomEvent::Spam),
        }
    }

    fn reduce_game(&mut self, update: GameUpdate) -> Option<RoomEvent> {
        match update {
            GameUpdate::RoundStarted(round) => {
                self.current_round = round;
                tracing::debug!(round, "round started");
                Some(RoomEvent::RoundStarted { round })
            }
            GameUpdate::WordChoicesGiven { drawer, words } => {
                self.drawer_id = Some(drawer);
                Some(RoomEvent::WordChoices {
                    drawer: self.member(drawer),
                    words,
                })
            }
            GameUpdate::WordChosen(round) => {
                if let Some(drawer) = round.id {
                    self.drawer_id = Some(drawer);
                }
                self.hint = seed_hint(&round);
                tracing::debug!(hint = %self.hint, "word chosen");
                Some(RoomEvent::ChooseWord {
                    hint: self.hint.clone(),
                })
            }
            GameUpdate::RoundResultsShown { word, scores, .. } => {
                let totals: HashMap<UserId, i64> =
                    scores.iter().map(|line| (line.id, line.total)).collect();
                for user in self.users.values_mut() {
                    user.has_guessed_correctly = false;
                    if let Some(&total) = totals.get(&user.id) {
                        user.score = total;
                    }
                }
                self.hint.clear();
                self.drawer_id = None;
                tracing::debug!(%word, "round ended");
                Some(RoomEvent::EndRound {
                    word,
                    score_changes: scores.iter().map(|line| (line.id, line.delta)).collect(),
                })
            }
            GameUpdate::PodiumShown(places) => Some(RoomEvent::Podium(
                places
                    .into_iter()
                    .map(|place| {
                        (
                            place.id,
                            PodiumEntry {
                                position: place.position,
                                score: place.score,
                            },
                        )
                    })
                    .collect(),
            )),
            GameUpdate::GameEnded => {
                for user in self.users.values_mut() {
                    user.score = 0;
                }
                self.hint.clear();
                self.drawer_id = None;
                tracing::debug!("game ended");
                Some(RoomEvent::EndGame)
            }
        }
    }

    /// Replaces the whole mirror with the snapshot.
    fn join(&mut self, snapshot: RoomSnapshot) -> RoomEvent {
        let RoomSnapshot {
            settings,
            room_id,
            is_private,
            me,
            owner,
            users,
            round,
            phase,
        } = snapshot;

        let (hint, drawer_id, previous_strokes) = match phase.round {
            Some(data) => (seed_hint(&data), data.id, data.draw_commands),
            None => (String::new(), None, Vec::new()),
        };

        *self = Self {
            self_id: Some(me),
            room_id: Some(room_id.clone()),
            owner_id: owner,
            users: users
                .into_iter()
                .map(|wire| {
                    let user = User::from(wire);
                    (user.id, user)
                })
                .collect(),
            settings: Some(settings.clone()),
            hint,
            current_round: round,
            is_private,
            drawer_id,
        };

        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|user| user.id);

        tracing::info!(
            %room_id,
            self_id = %me,
            users = users.len(),
            private = is_private,
            "joined room"
        );

        RoomEvent::Join(Box::new(RoomInformation {
            self_id: me,
            owner_id: owner,
            room_id,
            settings,
            previous_strokes,
            current_round: round,
            is_private,
            users,
        }))
    }

    fn member(&self, id: UserId) -> Member {
        match self.users.get(&id) {
            Some(user) => Member::Known(user.clone()),
            None => {
                tracing::warn!(user_id = %id, "event references unknown user");
                Member::Unknown(id)
            }
        }
    }
}

/// The hint for a fresh turn, with any letters already revealed.
fn seed_hint(round: &RoundData) -> String {
    let mut hint = match &round.word {
        Some(WordShape::Lengths(lengths)) => lengths
            .iter()
            .map(|&len| "_".repeat(len))
            .collect::<Vec<_>>()
            .join(" "),
        Some(WordShape::Plain(word)) => word.clone(),
        None => String::new(),
    };
    apply_reveals(&mut hint, &round.hints);
    hint
}

/// Overwrites single characters. Positions are character indices.
fn apply_reveals(hint: &mut String, reveals: &[HintReveal]) {
    let mut chars: Vec<char> = hint.chars().collect();
    for &(index, letter) in reveals {
        match chars.get_mut(index) {
            Some(slot) => *slot = letter,
            None => tracing::warn!(index, len = chars.len(), "hint position out of range, ignored"),
        }
    }
    *hint = chars.into_iter().collect();
}
