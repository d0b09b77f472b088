//! Roster coverage invariant: one score entry and one ledger per player.

use super::Invariant;
use crate::{MatchState, PlayerId};
use std::collections::BTreeSet;

/// Invariant: the variant score map and the ledger map each contain exactly
/// the players of the play order.
pub struct RosterCoverageInvariant;

impl Invariant<MatchState> for RosterCoverageInvariant {
    fn holds(state: &MatchState) -> bool {
        let roster: BTreeSet<PlayerId> = state.play_order().iter().copied().collect();
        if roster.len() != state.play_order().len() {
            return false;
        }

        let scored: BTreeSet<PlayerId> = state.variant().player_ids().into_iter().collect();
        let ledgers: BTreeSet<PlayerId> = state.common_player_data().keys().copied().collect();

        scored == roster && ledgers == roster
    }

    fn description() -> &'static str {
        "Every configured player has exactly one score entry and one ledger"
    }
}
