//! Tests for full Cricket legs driven through the local runtime.

use strictly_darts::{
    Action, CricketSection, GameType, HitEffect, MatchConfig, MatchSession, Phase, PlayerId,
    SessionEvent, VariantState,
};

fn play(session: &mut MatchSession, actions: &[&str]) {
    for label in actions {
        let action = match *label {
            "end" => Action::EndTurn,
            "undo" => Action::Undo,
            segment => Action::Throw(segment.parse().expect("valid segment")),
        };
        session.apply(action).expect("accepted action");
    }
}

fn cricket_score(session: &MatchSession, player: u32) -> u32 {
    session.state().score(PlayerId::new(player)).expect("player score")
}

#[test]
fn test_closing_everything_on_a_tie_wins() {
    let mut session = MatchSession::new(&MatchConfig::new(GameType::Cricket, 2)).unwrap();

    play(&mut session, &["T15", "T16", "T17", "end", "T18", "T19", "T20", "end", "DB"]);
    assert!(session.state().winner().is_none());

    let event = session.apply(Action::Throw("SB".parse().unwrap())).unwrap();
    assert_eq!(
        event,
        SessionEvent::Hit {
            effect: HitEffect::Counted { points: 0 },
            turn_ended: false
        }
    );
    assert_eq!(*session.state().winner(), Some(PlayerId::new(0)));
    assert_eq!(*session.state().phase(), Phase::GameOver);
}

#[test]
fn test_closing_everything_behind_on_points_does_not_win() {
    let mut session = MatchSession::new(&MatchConfig::new(GameType::Cricket, 2)).unwrap();

    // Player 0 closes 15-17; player 1 closes 20 and scores 60 on it.
    play(&mut session, &["T15", "T16", "T17", "T20", "T20", "end"]);
    assert_eq!(cricket_score(&session, 1), 60);

    // Player 0 closes 18-20; 20 is already closed by player 1 and scores nothing.
    play(&mut session, &["T18", "T19", "T20", "end"]);
    assert_eq!(cricket_score(&session, 0), 0);

    // Everything closed but 57 < 60.
    play(&mut session, &["DB", "SB", "T19", "end"]);
    assert_eq!(cricket_score(&session, 0), 57);
    assert!(session.state().winner().is_none());

    // The next scoring dart puts player 0 ahead and ends the leg.
    play(&mut session, &["T19"]);
    assert_eq!(cricket_score(&session, 0), 114);
    assert_eq!(*session.state().winner(), Some(PlayerId::new(0)));
}

#[test]
fn test_misses_consume_darts() {
    let mut session = MatchSession::new(&MatchConfig::new(GameType::Cricket, 2)).unwrap();

    let event = session.apply(Action::Throw("T14".parse().unwrap())).unwrap();
    assert_eq!(
        event,
        SessionEvent::Hit {
            effect: HitEffect::Noop,
            turn_ended: false
        }
    );
    play(&mut session, &["MISS"]);
    assert_eq!(session.num_moves(), 2);
    assert_eq!(
        session.state().ledger(PlayerId::new(0)).map(|l| l.len()),
        Some(2)
    );

    play(&mut session, &["S1"]);
    assert_eq!(session.current_player(), PlayerId::new(1));
}

#[test]
fn test_marks_keep_counting_past_three() {
    let mut session = MatchSession::new(&MatchConfig::new(GameType::Cricket, 2)).unwrap();
    play(&mut session, &["T20", "T20", "T20"]);

    let VariantState::Cricket(cricket) = session.state().variant() else {
        panic!("Expected cricket state");
    };
    let sheet = cricket.player(PlayerId::new(0)).unwrap();
    assert_eq!(sheet.marks(CricketSection::Twenty), 9);
    assert_eq!(*sheet.score(), 120);
}

#[test]
fn test_single_player_never_scores() {
    let mut session = MatchSession::new(&MatchConfig::new(GameType::Cricket, 1)).unwrap();
    play(&mut session, &["T20", "T20", "T20"]);
    assert_eq!(cricket_score(&session, 0), 0);
}
