//! Integration tests: feed wire messages through a mirror and check state
//! and events together.

use skribbl_protocol::{
    Color, Envelope, Inbound, Language, RemovalReason, StartGameFailReason, UserId, WordMode, fill,
};
use skribbl_room::{EventKind, Member, PodiumEntry, RoomError, RoomEvent, RoomMirror};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

// =========================================================================
// Fixtures
// =========================================================================

fn frame(id: u32, data: Value) -> Inbound {
    Inbound::Data(Envelope::new(id, data))
}

fn user(id: u32, name: &str, score: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "avatar": [1, 2, 3, -1],
        "score": score,
        "guessed": false,
        "flags": 0
    })
}

fn room_info() -> Inbound {
    frame(
        10,
        json!({
            "settings": [0, 8, 80, 3, 3, 2, 0, 0],
            "id": "roomCode",
            "type": 1,
            "me": 1,
            "owner": 1,
            "users": [user(1, "me", 0), user(2, "ann", 100), user(3, "bob", 50)],
            "round": 0,
            "state": { "id": 0, "time": 0, "data": 0 }
        }),
    )
}

fn joined() -> RoomMirror {
    let mut mirror = RoomMirror::new();
    mirror.handle(room_info()).unwrap();
    mirror
}

fn game(id: u32, data: Value) -> Inbound {
    frame(11, json!({ "id": id, "time": 10, "data": data }))
}

fn event(mirror: &mut RoomMirror, inbound: Inbound) -> RoomEvent {
    mirror.handle(inbound).unwrap().expect("an event")
}

// =========================================================================
// Join
// =========================================================================

#[test]
fn test_join_populates_state() {
    let mut mirror = RoomMirror::new();
    let RoomEvent::Join(info) = event(&mut mirror, room_info()) else {
        panic!("expected Join");
    };

    assert_eq!(info.self_id, UserId(1));
    assert_eq!(info.owner_id, Some(UserId(1)));
    assert!(info.is_private);
    assert_eq!(info.users.len(), 3);
    assert_eq!(info.users[0].id, UserId(1));
    assert!(info.previous_strokes.is_empty());

    let state = mirror.state();
    assert!(state.is_joined());
    assert_eq!(state.room_id().map(|r| r.0.as_str()), Some("roomCode"));
    assert_eq!(state.settings().unwrap().language, Language::English);
    assert_eq!(state.user(UserId(2)).unwrap().score, 100);
    assert_eq!(state.hint(), "");
}

#[test]
fn test_join_mid_round_seeds_hint_and_strokes() {
    let mut mirror = RoomMirror::new();
    let inbound = frame(
        10,
        json!({
            "settings": [1, 8, 80, 3, 3, 2, 1, 0],
            "id": "roomCode",
            "type": 0,
            "me": 4,
            "users": [user(4, "me", 0), user(5, "drawer", 0)],
            "round": 2,
            "state": {
                "id": 4,
                "time": 42,
                "data": {
                    "id": 5,
                    "word": [3, 2],
                    "hints": [[0, "c"], [4, "a"]],
                    "drawCommands": [[1, 4, 10, 20]]
                }
            }
        }),
    );
    let RoomEvent::Join(info) = event(&mut mirror, inbound) else {
        panic!("expected Join");
    };

    assert_eq!(info.previous_strokes, vec![fill(Color::Red, 10, 20)]);
    assert_eq!(info.current_round, 2);
    assert!(!info.is_private);
    assert_eq!(info.owner_id, None);
    assert_eq!(info.settings.language, Language::German);
    assert_eq!(info.settings.word_mode, WordMode::Hidden);

    let state = mirror.state();
    assert_eq!(state.hint(), "c__ a_");
    assert_eq!(state.drawer_id(), Some(UserId(5)));
    assert_eq!(state.current_round(), 2);
}

#[test]
fn test_join_outside_a_drawing_turn_has_no_hint() {
    let phases = [
        (3, json!({ "id": 2 })),
        (5, json!({ "reason": 0, "scores": [1, 100, 100], "word": "cat" })),
        (6, json!([[1, 1, 100]])),
    ];
    for (phase, data) in phases {
        let mut mirror = RoomMirror::new();
        let inbound = frame(
            10,
            json!({
                "settings": [0, 8, 80, 3, 3, 2, 0, 0],
                "id": "roomCode",
                "me": 1,
                "users": [user(1, "me", 100), user(2, "ann", 0)],
                "round": 1,
                "state": { "id": phase, "time": 5, "data": data }
            }),
        );
        let RoomEvent::Join(info) = event(&mut mirror, inbound) else {
            panic!("expected Join in phase {phase}");
        };
        assert!(info.previous_strokes.is_empty(), "phase {phase}");

        let state = mirror.state();
        assert_eq!(state.hint(), "", "phase {phase}");
        assert_eq!(state.drawer_id(), None, "phase {phase}");
    }
}

#[test]
fn test_second_join_rebuilds_users() {
    let mut mirror = joined();
    mirror.handle(frame(1, user(9, "late", 0))).unwrap();
    assert_eq!(mirror.state().user_count(), 4);

    mirror.handle(room_info()).unwrap();
    assert_eq!(mirror.state().user_count(), 3);
    assert!(mirror.state().user(UserId(9)).is_none());
}

// =========================================================================
// Users
// =========================================================================

#[test]
fn test_add_and_remove_user() {
    let mut mirror = joined();

    let RoomEvent::AddUser(added) = event(&mut mirror, frame(1, user(7, "eve", 0))) else {
        panic!("expected AddUser");
    };
    assert_eq!(added.name, "eve");
    assert!(mirror.state().user(UserId(7)).is_some());

    let removed = event(&mut mirror, frame(2, json!({ "id": 7, "reason": 1 })));
    assert_eq!(
        removed,
        RoomEvent::RemoveUser {
            user: Member::Known(added),
            reason: RemovalReason::Kicked,
        }
    );
    assert!(mirror.state().user(UserId(7)).is_none());
}

#[test]
fn test_unknown_user_does_not_panic() {
    let mut mirror = joined();
    let guess = event(&mut mirror, frame(30, json!({ "id": 99, "msg": "hello" })));
    assert_eq!(
        guess,
        RoomEvent::Guess {
            author: Member::Unknown(UserId(99)),
            text: "hello".into(),
        }
    );
}

#[test]
fn test_votekick() {
    let mut mirror = joined();
    let RoomEvent::Votekick {
        voter,
        target,
        votes,
        required,
    } = event(&mut mirror, frame(5, json!([2, 3, 1, 2])))
    else {
        panic!("expected Votekick");
    };
    assert_eq!(voter.name(), "ann");
    assert_eq!(target.id(), UserId(3));
    assert_eq!((votes, required), (1, 2));
}

#[test]
fn test_vote_is_inverted() {
    let mut mirror = joined();
    let dislike = event(&mut mirror, frame(8, json!({ "id": 2, "vote": 1 })));
    assert!(matches!(dislike, RoomEvent::Vote { liked: false, .. }));
    let like = event(&mut mirror, frame(8, json!({ "id": 2, "vote": 0 })));
    assert!(matches!(like, RoomEvent::Vote { liked: true, .. }));
}

#[test]
fn test_owner_update() {
    let mut mirror = joined();
    let owner = event(&mut mirror, frame(17, json!(3)));
    assert_eq!(owner.kind(), EventKind::NewOwner);
    assert_eq!(mirror.state().owner_id(), Some(UserId(3)));
}

// =========================================================================
// Rounds
// =========================================================================

#[test]
fn test_round_flow() {
    let mut mirror = joined();

    assert_eq!(
        event(&mut mirror, game(2, json!(1))),
        RoomEvent::RoundStarted { round: 1 }
    );
    assert_eq!(mirror.state().current_round(), 1);

    let RoomEvent::WordChoices { drawer, words } =
        event(&mut mirror, game(3, json!({ "id": 2 })))
    else {
        panic!("expected WordChoices");
    };
    assert_eq!(drawer.id(), UserId(2));
    assert_eq!(words, None);
    assert_eq!(mirror.state().drawer_id(), Some(UserId(2)));

    let chosen = event(&mut mirror, game(4, json!({ "id": 2, "word": [3, 2], "hints": [] })));
    assert_eq!(chosen, RoomEvent::ChooseWord { hint: "___ __".into() });

    let revealed = event(&mut mirror, frame(13, json!([[0, "c"], [4, "a"]])));
    assert_eq!(revealed, RoomEvent::HintReveal { hint: "c__ a_".into() });
    assert_eq!(mirror.state().hint(), "c__ a_");
}

#[test]
fn test_word_choices_for_the_drawer() {
    let mut mirror = joined();
    let RoomEvent::WordChoices { words, .. } =
        event(&mut mirror, game(3, json!({ "id": 1, "words": ["cat", "dog", "sun"] })))
    else {
        panic!("expected WordChoices");
    };
    assert_eq!(words.unwrap(), vec!["cat", "dog", "sun"]);
}

#[test]
fn test_correct_guess_marks_user() {
    let mut mirror = joined();
    let guessed = event(&mut mirror, frame(15, json!({ "id": 3 })));
    let RoomEvent::CorrectGuess { author, word } = guessed else {
        panic!("expected CorrectGuess");
    };
    assert!(author.user().unwrap().has_guessed_correctly);
    assert_eq!(word, None);
    assert!(mirror.state().user(UserId(3)).unwrap().has_guessed_correctly);
}

#[test]
fn test_round_results_replace_scores_with_totals() {
    let mut mirror = joined();
    mirror.handle(frame(15, json!({ "id": 2 }))).unwrap();
    mirror.handle(frame(15, json!({ "id": 3 }))).unwrap();

    let ended = event(
        &mut mirror,
        game(5, json!({ "reason": 0, "word": "cat", "scores": [2, 180, 80, 3, 50, 0] })),
    );
    let RoomEvent::EndRound { word, score_changes } = ended else {
        panic!("expected EndRound");
    };
    assert_eq!(word, "cat");
    assert_eq!(score_changes[&UserId(2)], 80);
    assert_eq!(score_changes[&UserId(3)], 0);

    let state = mirror.state();
    assert_eq!(state.user(UserId(2)).unwrap().score, 180);
    assert_eq!(state.user(UserId(3)).unwrap().score, 50);
    // Not in the payload: score kept.
    assert_eq!(state.user(UserId(1)).unwrap().score, 0);
    assert!(state.users().all(|u| !u.has_guessed_correctly));
}

#[test]
fn test_state_is_updated_before_subscribers_run() {
    let mut mirror = joined();
    let mut rx = mirror.events().channel();
    mirror.handle(frame(15, json!({ "id": 2 }))).unwrap();

    let RoomEvent::CorrectGuess { author, .. } = rx.try_recv().unwrap() else {
        panic!("expected CorrectGuess");
    };
    assert!(author.user().unwrap().has_guessed_correctly);
}

#[test]
fn test_end_round_callback_sees_totals() {
    let mut mirror = joined();
    mirror.handle(frame(15, json!({ "id": 2 }))).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    mirror.events().on(EventKind::EndRound, move |_, state| {
        let mut users: Vec<_> = state
            .users()
            .map(|u| (u.id, u.score, u.has_guessed_correctly))
            .collect();
        users.sort();
        sink.lock().unwrap().extend(users);
    });

    mirror
        .handle(game(5, json!({ "reason": 0, "word": "cat", "scores": [2, 180, 80] })))
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (UserId(1), 0, false),
            (UserId(2), 180, false),
            (UserId(3), 50, false),
        ]
    );
}

#[test]
fn test_podium() {
    let mut mirror = joined();
    let RoomEvent::Podium(podium) = event(&mut mirror, game(6, json!([[2, 1, 900], [3, 2, 300]])))
    else {
        panic!("expected Podium");
    };
    assert_eq!(podium[&UserId(2)], PodiumEntry { position: 1, score: 900 });
    assert_eq!(podium.len(), 2);
}

#[test]
fn test_game_ended_twice_keeps_scores_at_zero() {
    let mut mirror = joined();
    for _ in 0..2 {
        assert_eq!(event(&mut mirror, game(7, json!(0))), RoomEvent::EndGame);
        assert!(mirror.state().users().all(|u| u.score == 0));
    }
}

// =========================================================================
// Settings
// =========================================================================

#[test]
fn test_settings_update_overwrites_one_slot() {
    let mut mirror = joined();
    let RoomEvent::SettingsUpdate(settings) =
        event(&mut mirror, frame(12, json!({ "id": "3", "val": "6" })))
    else {
        panic!("expected SettingsUpdate");
    };
    assert_eq!(settings.rounds, 6);
    assert_eq!(settings.max_players, 8);
    assert_eq!(mirror.state().settings().unwrap().rounds, 6);
}

#[test]
fn test_settings_update_before_join_is_ignored() {
    let mut mirror = RoomMirror::new();
    let result = mirror.handle(frame(12, json!({ "id": 3, "val": 6 }))).unwrap();
    assert_eq!(result, None);
    assert!(mirror.state().settings().is_none());
}

// =========================================================================
// Canvas and chat
// =========================================================================

#[test]
fn test_canvas_events() {
    let mut mirror = joined();
    let drawn = event(&mut mirror, frame(19, json!([[0, 1, 4, 0, 0, 10, 10], [1, 0, 5, 5]])));
    let RoomEvent::Draw(strokes) = drawn else {
        panic!("expected Draw");
    };
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[1], fill(Color::White, 5, 5));

    assert_eq!(event(&mut mirror, frame(20, Value::Null)), RoomEvent::Clear);
    assert_eq!(event(&mut mirror, frame(21, json!(4))), RoomEvent::Undo { stroke_index: 4 });
}

#[test]
fn test_chat_side_events() {
    let mut mirror = joined();
    assert_eq!(
        event(&mut mirror, frame(16, json!("cat"))),
        RoomEvent::CloseGuess { word: "cat".into() }
    );
    assert_eq!(
        event(&mut mirror, frame(31, json!({ "id": 0 }))),
        RoomEvent::StartGameFail(StartGameFailReason::NotEnoughPlayers)
    );
    assert_eq!(
        event(&mut mirror, frame(31, json!({ "id": 5 }))),
        RoomEvent::StartGameFail(StartGameFailReason::Unknown(5))
    );
    assert_eq!(event(&mut mirror, frame(32, Value::Null)), RoomEvent::Spam);
}

#[test]
fn test_time_update_has_no_event() {
    let mut mirror = joined();
    assert_eq!(mirror.handle(frame(14, json!(30))).unwrap(), None);
}

// =========================================================================
// Fatal errors
// =========================================================================

#[test]
fn test_join_error_is_fatal() {
    let mut mirror = RoomMirror::new();
    let err = mirror.handle(Inbound::JoinError(1)).unwrap_err();
    assert!(matches!(err, RoomError::JoinFailed { reason: 1 }));
    assert!(mirror.is_halted());
    assert!(matches!(mirror.handle(room_info()), Err(RoomError::Halted)));
}

#[test]
fn test_protocol_mismatch_halts_but_keeps_state() {
    let mut mirror = joined();
    mirror.handle(frame(17, json!(2))).unwrap();

    let err = mirror.handle(frame(99, json!(null))).unwrap_err();
    assert!(matches!(err, RoomError::Protocol(_)));

    assert!(matches!(mirror.handle(frame(17, json!(3))), Err(RoomError::Halted)));
    assert_eq!(mirror.state().owner_id(), Some(UserId(2)));
}

#[test]
fn test_mismatched_payload_halts() {
    let mut mirror = joined();
    let err = mirror.handle(frame(1, json!("not a user"))).unwrap_err();
    assert!(matches!(err, RoomError::Protocol(_)));
    assert!(mirror.is_halted());
}
