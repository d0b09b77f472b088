//! Settled winner invariant: a winner ends the leg.

use super::Invariant;
use crate::{MatchState, Phase};

/// Invariant: a winner is set exactly when the phase is `GameOver`, and the
/// winner is one of the configured players.
pub struct SettledWinnerInvariant;

impl Invariant<MatchState> for SettledWinnerInvariant {
    fn holds(state: &MatchState) -> bool {
        match state.winner() {
            Some(winner) => {
                *state.phase() == Phase::GameOver && state.play_order().contains(winner)
            }
            None => *state.phase() == Phase::InGame,
        }
    }

    fn description() -> &'static str {
        "A winner is set exactly when the leg is over"
    }
}
