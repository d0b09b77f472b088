//! Per-turn throw ledger shared by every variant.
//!
//! The ledger only keeps track of what was thrown. Whether a throw is legal
//! or what it scores is decided by the variant engines.

use super::Segment;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Darts a player throws in one turn.
pub const MAX_THROWS_PER_TURN: usize = 3;

/// Variant-independent data kept for every player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPlayerData {
    /// Throws of the current turn, oldest first.
    dart_throws: Vec<Segment>,
}

impl CommonPlayerData {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a throw. The calling engine enforces the per-turn limit.
    #[instrument(skip(self), fields(recorded = self.dart_throws.len()))]
    pub fn record_throw(&mut self, segment: Segment) {
        self.dart_throws.push(segment);
    }

    /// Empties the ledger at the start of a new turn.
    #[instrument(skip(self))]
    pub fn clear_for_new_turn(&mut self) {
        self.dart_throws.clear();
    }

    /// Throws recorded this turn.
    pub fn throws(&self) -> &[Segment] {
        &self.dart_throws
    }

    /// Number of throws recorded this turn.
    pub fn len(&self) -> usize {
        self.dart_throws.len()
    }

    /// True when nothing has been thrown this turn.
    pub fn is_empty(&self) -> bool {
        self.dart_throws.is_empty()
    }

    /// True once all three slots are used.
    pub fn is_full(&self) -> bool {
        self.dart_throws.len() >= MAX_THROWS_PER_TURN
    }

    /// Sum of the values of the recorded throws.
    pub fn total_value(&self) -> u32 {
        self.dart_throws.iter().map(Segment::value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_clear() {
        let mut ledger = CommonPlayerData::new();
        ledger.record_throw(Segment::triple(20).unwrap());
        ledger.record_throw(Segment::miss());
        assert_eq!(ledger.len(), 2);
        assert!(!ledger.is_full());
        assert_eq!(ledger.total_value(), 60);

        ledger.record_throw(Segment::single(1).unwrap());
        assert!(ledger.is_full());

        ledger.clear_for_new_turn();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_keeps_throw_order() {
        let mut ledger = CommonPlayerData::new();
        let throws = [
            Segment::single(5).unwrap(),
            Segment::double(7).unwrap(),
            Segment::bust(),
        ];
        for segment in throws {
            ledger.record_throw(segment);
        }
        assert_eq!(ledger.throws(), &throws);
    }
}
