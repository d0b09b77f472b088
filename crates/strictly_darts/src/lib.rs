//! Strictly Darts - deterministic darts scoring
//!
//! A scoring engine for Cricket and countdown ("01") darts shared by
//! several players. Every copy of a match that applies the same actions in
//! the same order ends up with an identical state, so the engine can run
//! independently on each peer of a replicated match.
//!
//! # Architecture
//!
//! - **Segment**: where a dart landed and what it is worth
//! - **Ledger**: the throws of the current turn
//! - **Variants**: Cricket and countdown engines behind [`ScoringEngine`]
//! - **Orchestrator**: setup, dispatch, end-of-leg evaluation, turn end
//! - **Session**: a local runtime that sequences turns and undo
//!
//! # Example
//!
//! ```
//! use strictly_darts::{GameType, MatchState, PlayerId, Segment, TurnContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let state = MatchState::with_players(GameType::Countdown, 2)?;
//! let ctx = TurnContext::new(PlayerId::new(0), 0);
//!
//! let transition = state.apply_hit(&ctx, Segment::triple(20)?)?;
//! assert_eq!(transition.state().score(PlayerId::new(0)), Some(441));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod ledger;
mod orchestrator;
mod player;
mod segment;
mod session;
mod state;

// Public module declarations
pub mod contracts;
pub mod invariants;
pub mod variant;

// Crate-level exports - Segments
pub use segment::{
    BULL, BUST_SECTION, CRICKET_MIN_SECTION, MAX_NUMBERED_SECTION, MISS_SECTION, Multiplier,
    RESET_BUTTON_SECTION, SCORING_CEILING, Segment, SegmentError, SegmentId,
};

// Crate-level exports - Ledger and players
pub use ledger::{CommonPlayerData, MAX_THROWS_PER_TURN};
pub use player::PlayerId;

// Crate-level exports - Actions and errors
pub use action::{Action, MoveError};

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_STARTING_SCORE, GameType, MatchConfig};

// Crate-level exports - Match state and orchestration
pub use orchestrator::Transition;
pub use state::{MAX_MOVES_PER_TURN, MatchState, Phase, TurnContext};

// Crate-level exports - Variants
pub use variant::{
    CountdownPlayer, CountdownState, CricketPlayer, CricketSection, CricketState, HitEffect,
    ScoringEngine, VariantState,
};

// Crate-level exports - Local runtime
pub use session::{MatchSession, SessionEvent};
