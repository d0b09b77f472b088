//! Contract-based validation for match transitions.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}

use super::invariants::{InvariantSet, MatchInvariants};
use super::{MatchState, MoveError, TurnContext};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the leg has no winner yet.
pub struct LegInProgress;

impl LegInProgress {
    /// Rejects actions once the leg is decided.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        if state.is_over() {
            Err(MoveError::LegOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the acting player belongs to the match.
pub struct PlayerInMatch;

impl PlayerInMatch {
    /// Rejects players that are not in the play order.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState, ctx: &TurnContext) -> Result<(), MoveError> {
        if state.play_order().contains(ctx.current_player()) {
            Ok(())
        } else {
            Err(MoveError::UnknownPlayer(*ctx.current_player()))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Hit Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for dart hits.
///
/// Preconditions:
/// - The leg is in progress
/// - The acting player is in the match
///
/// Postconditions:
/// - A decided winner never changes
/// - Every [`MatchInvariants`] member holds
pub struct HitContract;

impl Contract<MatchState, TurnContext> for HitContract {
    fn pre(state: &MatchState, ctx: &TurnContext) -> Result<(), MoveError> {
        LegInProgress::check(state)?;
        PlayerInMatch::check(state, ctx)
    }

    fn post(before: &MatchState, after: &MatchState) -> Result<(), MoveError> {
        if before.winner().is_some() && before.winner() != after.winner() {
            warn!("Winner changed after being decided");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: winner changed after being decided".to_string(),
            ));
        }

        MatchInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
