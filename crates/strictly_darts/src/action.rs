//! First-class player actions and move errors.
//!
//! Actions are domain events: they can be validated, logged, serialized
//! into an action log and replayed in the same order on every peer.

use super::{PlayerId, Segment};
use serde::{Deserialize, Serialize};

/// Something a player does at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// A dart landed on (or was tapped on) a segment.
    Throw(Segment),
    /// The player ends their turn.
    EndTurn,
    /// Revert the last throw of the current turn.
    Undo,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Throw(segment) => write!(f, "throw {}", segment),
            Action::EndTurn => write!(f, "end turn"),
            Action::Undo => write!(f, "undo"),
        }
    }
}

/// Reason an action was rejected.
///
/// A rejection never changes match state. Internal variants indicate a
/// corrupted state rather than a player mistake; see [`MoveError::is_internal`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The player already threw every dart of this turn.
    #[display("Player {} has no darts left this turn", _0)]
    TurnComplete(PlayerId),

    /// The leg already has a winner.
    #[display("The leg is already over")]
    LegOver,

    /// The acting player is not part of this match.
    #[display("Player {} is not in this match", _0)]
    UnknownPlayer(PlayerId),

    /// There is no throw in the current turn to revert.
    #[display("Nothing to undo")]
    NothingToUndo,

    /// Per-player data the active variant needs is missing.
    #[display("No {} data for player {}", _1, _0)]
    MissingPlayerData(PlayerId, &'static str),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// True when the rejection points at corrupted state, not a bad move.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            MoveError::MissingPlayerData(..) | MoveError::InvariantViolation(_)
        )
    }
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_log_format() {
        let actions = vec![
            Action::Throw(Segment::triple(20).unwrap()),
            Action::EndTurn,
            Action::Undo,
        ];
        let json = serde_json::to_string(&actions).unwrap();
        assert_eq!(json, r#"[{"throw":"T20"},"end_turn","undo"]"#);

        let back: Vec<Action> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actions);
    }

    #[test]
    fn test_internal_errors() {
        assert!(MoveError::MissingPlayerData(PlayerId::new(0), "countdown").is_internal());
        assert!(MoveError::InvariantViolation("x".into()).is_internal());
        assert!(!MoveError::TurnComplete(PlayerId::new(1)).is_internal());
        assert!(!MoveError::LegOver.is_internal());
    }
}
