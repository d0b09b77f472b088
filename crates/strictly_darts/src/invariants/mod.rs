//! First-class invariants for match state.
//!
//! Invariants are logical properties that must hold after every accepted
//! action. They are checked as postconditions in debug builds and can be
//! tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        collect(violations)
    }
}

pub mod roster_coverage;
pub mod settled_winner;
pub mod throw_limit;

pub use roster_coverage::RosterCoverageInvariant;
pub use settled_winner::SettledWinnerInvariant;
pub use throw_limit::ThrowLimitInvariant;

/// All match invariants as a composable set.
pub type MatchInvariants = (
    ThrowLimitInvariant,
    RosterCoverageInvariant,
    SettledWinnerInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameType, MatchState, PlayerId, Segment, TurnContext};

    #[test]
    fn test_invariant_set_holds_for_fresh_match() {
        let state = MatchState::with_players(GameType::Cricket, 3).unwrap();
        assert!(MatchInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_hits() {
        let state = MatchState::with_players(GameType::Countdown, 2).unwrap();
        let ctx = TurnContext::new(PlayerId::new(0), 0);
        let state = state
            .apply_hit(&ctx, Segment::triple(20).unwrap())
            .unwrap()
            .into_state();
        assert!(MatchInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = MatchState::with_players(GameType::Cricket, 2).unwrap();
        state.common_player_data.remove(&PlayerId::new(1));
        state.winner = Some(PlayerId::new(0));

        let violations = MatchInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let state = MatchState::with_players(GameType::Cricket, 2).unwrap();
        type TwoInvariants = (ThrowLimitInvariant, SettledWinnerInvariant);
        assert!(TwoInvariants::check_all(&state).is_ok());
    }
}
