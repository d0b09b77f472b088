//! Plain-text scoreboard for the hot-seat mode.

use std::fmt::Write;
use strictly_darts::variant::CLOSED_MARKS;
use strictly_darts::{CricketSection, MatchSession, MatchState, PlayerId, Segment, VariantState};
use strum::IntoEnumIterator;

/// Cricket mark glyph: `/`, `X`, then a closed circle.
fn mark_glyph(marks: u32) -> &'static str {
    match marks {
        0 => ".",
        1 => "/",
        2 => "X",
        _ => "O",
    }
}

fn throws_line(state: &MatchState, player: PlayerId) -> String {
    state
        .ledger(player)
        .map(|ledger| {
            ledger
                .throws()
                .iter()
                .map(Segment::short_name)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Renders the scoreboard of a session.
pub fn render(session: &MatchSession) -> String {
    let state = session.state();
    let mut out = String::new();

    let _ = writeln!(out, "{} | turn {}", state.game_type(), state.turn_number());

    if let VariantState::Cricket(_) = state.variant() {
        let header = CricketSection::iter()
            .map(|s| format!("{:>4}", s.to_string()))
            .collect::<String>();
        let _ = writeln!(out, "{:<12}{}  score", "", header);
    }

    for player in state.play_order() {
        let marker = if *player == session.current_player() && !state.is_over() {
            ">"
        } else {
            " "
        };
        let label = format!("{} player {}", marker, player);

        match state.variant() {
            VariantState::Cricket(cricket) => {
                let Some(sheet) = cricket.player(*player) else {
                    continue;
                };
                let marks = CricketSection::iter()
                    .map(|s| format!("{:>4}", mark_glyph(sheet.marks(s).min(CLOSED_MARKS))))
                    .collect::<String>();
                let _ = writeln!(out, "{:<12}{}  {:>5}", label, marks, sheet.score());
            }
            VariantState::Countdown(countdown) => {
                let Some(remaining) = countdown.player(*player) else {
                    continue;
                };
                let _ = writeln!(out, "{:<12}{:>5}", label, remaining.score());
            }
        }

        let throws = throws_line(state, *player);
        if !throws.is_empty() {
            let _ = writeln!(out, "{:<12}[{}]", "", throws);
        }
    }

    match state.winner() {
        Some(winner) => {
            let _ = writeln!(out, "player {} wins", winner);
        }
        None => {
            let _ = writeln!(
                out,
                "player {} to throw, dart {}",
                session.current_player(),
                session.num_moves() + 1
            );
        }
    }
    out
}
