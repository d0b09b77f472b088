//! Tests that peers applying the same action log stay identical.

use strictly_darts::{
    Action, GameType, MAX_THROWS_PER_TURN, MatchConfig, MatchSession, MatchState, MoveError,
    PlayerId, Segment, TurnContext,
};

fn action_log() -> Vec<Action> {
    serde_json::from_str(
        r#"[
            {"throw": "T20"}, {"throw": "S19"}, "undo", {"throw": "D18"},
            {"throw": "T17"}, {"throw": "MISS"}, "end_turn",
            {"throw": "DB"}, {"throw": "T20"}, {"throw": "RESET"},
            {"throw": "S3"}, {"throw": "T16"}, {"throw": "T16"}
        ]"#,
    )
    .unwrap()
}

fn replay(config: &MatchConfig, actions: &[Action]) -> MatchSession {
    let mut session = MatchSession::new(config).unwrap();
    for action in actions {
        // Rejections are part of a live log and must not stop replay.
        let _ = session.apply(*action);
    }
    session
}

#[test]
fn test_identical_logs_give_identical_states() {
    for game_type in [GameType::Cricket, GameType::Countdown] {
        let config = MatchConfig::new(game_type, 3);
        let peer_a = replay(&config, &action_log());
        let peer_b = replay(&config, &action_log());

        assert_eq!(peer_a.state(), peer_b.state());
        assert_eq!(
            peer_a.state().to_json().unwrap(),
            peer_b.state().to_json().unwrap()
        );
    }
}

#[test]
fn test_state_survives_serialization() {
    let session = replay(&MatchConfig::new(GameType::Cricket, 2), &action_log());
    let json = session.state().to_json().unwrap();
    let restored: MatchState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, session.state());
}

#[test]
fn test_ledger_never_exceeds_three_throws() {
    let config = MatchConfig::new(GameType::Countdown, 2)
        .with_starting_score(301)
        .with_auto_end_turn(false);
    let mut session = MatchSession::new(&config).unwrap();

    let throws = ["T20", "S1", "S1", "S1", "D10", "T19", "S5"];
    for label in throws {
        let _ = session.apply(Action::Throw(label.parse().unwrap()));
        for player in session.state().play_order() {
            let len = session.state().ledger(*player).unwrap().len();
            assert!(len <= MAX_THROWS_PER_TURN);
        }
    }
}

#[test]
fn test_invalid_moves_change_nothing() {
    let state = MatchState::with_players(GameType::Countdown, 2).unwrap();
    let state = state
        .apply_hit(&TurnContext::new(PlayerId::new(0), 0), Segment::triple(20).unwrap())
        .unwrap()
        .into_state();
    let snapshot = state.clone();

    let rejected = [
        state.apply_hit(&TurnContext::new(PlayerId::new(0), 3), Segment::triple(20).unwrap()),
        state.apply_hit(&TurnContext::new(PlayerId::new(5), 0), Segment::triple(20).unwrap()),
    ];
    assert_eq!(rejected[0], Err(MoveError::TurnComplete(PlayerId::new(0))));
    assert_eq!(rejected[1], Err(MoveError::UnknownPlayer(PlayerId::new(5))));
    assert_eq!(state, snapshot);
}
