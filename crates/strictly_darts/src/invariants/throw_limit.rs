//! Throw limit invariant: no ledger holds more than three throws.

use super::Invariant;
use crate::{MAX_THROWS_PER_TURN, MatchState};

/// Invariant: every player's ledger holds at most three throws.
pub struct ThrowLimitInvariant;

impl Invariant<MatchState> for ThrowLimitInvariant {
    fn holds(state: &MatchState) -> bool {
        state
            .common_player_data()
            .values()
            .all(|ledger| ledger.len() <= MAX_THROWS_PER_TURN)
    }

    fn description() -> &'static str {
        "No player has more than three throws recorded this turn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameType, PlayerId, Segment};

    #[test]
    fn test_fresh_match_holds() {
        let state = MatchState::with_players(GameType::Cricket, 2).unwrap();
        assert!(ThrowLimitInvariant::holds(&state));
    }

    #[test]
    fn test_overfull_ledger_violates() {
        let mut state = MatchState::with_players(GameType::Cricket, 2).unwrap();
        let ledger = state
            .common_player_data
            .get_mut(&PlayerId::new(0))
            .unwrap();
        for _ in 0..4 {
            ledger.record_throw(Segment::miss());
        }
        assert!(!ThrowLimitInvariant::holds(&state));
    }
}
