//! Variant scoring engines.
//!
//! Each variant is a plain state type implementing [`ScoringEngine`].
//! [`VariantState`] is the tagged union the match state stores, so
//! dispatch is a `match` and every engine can be tested on its own.

mod countdown;
mod cricket;

pub use countdown::{CountdownPlayer, CountdownState};
pub use cricket::{CLOSED_MARKS, CricketPlayer, CricketSection, CricketState};

use super::{CommonPlayerData, GameType, MatchConfig, MoveError, PlayerId, Segment, TurnContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// What an accepted hit did to the score state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitEffect {
    /// The hit counted. `points` is what the throw was worth to the
    /// variant: points gained in Cricket, points deducted in countdown.
    Counted {
        /// Points gained or deducted.
        points: u32,
    },
    /// The hit busted the turn; earlier throws of the turn were reverted.
    Bust,
    /// The hit did not affect scoring (a miss, an ignored input).
    Noop,
}

impl HitEffect {
    /// True for hits that left the score state alone.
    pub fn is_noop(&self) -> bool {
        matches!(self, HitEffect::Noop)
    }
}

/// Capability shared by every variant engine.
pub trait ScoringEngine: Sized {
    /// Builds the score state of a fresh leg.
    fn on_leg_setup(config: &MatchConfig, play_order: &[PlayerId]) -> Self;

    /// Applies one dart for `ctx.current_player()`.
    ///
    /// `ledger` is the acting player's throw ledger. On `Err` the caller
    /// discards both `self` and `ledger`.
    fn apply_hit(
        &mut self,
        ctx: &TurnContext,
        ledger: &mut CommonPlayerData,
        segment: Segment,
    ) -> Result<HitEffect, MoveError>;

    /// Returns the winner if the leg is over from the current player's view.
    fn evaluate_end(&self, ctx: &TurnContext) -> Option<PlayerId>;
}

/// Score state of the active variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantState {
    /// Cricket leg.
    Cricket(CricketState),
    /// Countdown (01) leg.
    Countdown(CountdownState),
}

impl VariantState {
    /// Builds the variant named by the configuration for a fresh leg.
    #[instrument(skip(config), fields(game_type = %config.game_type()))]
    pub fn on_leg_setup(config: &MatchConfig, play_order: &[PlayerId]) -> Self {
        match config.game_type() {
            GameType::Cricket => {
                VariantState::Cricket(CricketState::on_leg_setup(config, play_order))
            }
            GameType::Countdown => {
                VariantState::Countdown(CountdownState::on_leg_setup(config, play_order))
            }
        }
    }

    /// Variant tag.
    pub fn game_type(&self) -> GameType {
        match self {
            VariantState::Cricket(_) => GameType::Cricket,
            VariantState::Countdown(_) => GameType::Countdown,
        }
    }

    /// Dispatches a hit to the active engine.
    pub fn apply_hit(
        &mut self,
        ctx: &TurnContext,
        ledger: &mut CommonPlayerData,
        segment: Segment,
    ) -> Result<HitEffect, MoveError> {
        match self {
            VariantState::Cricket(state) => state.apply_hit(ctx, ledger, segment),
            VariantState::Countdown(state) => state.apply_hit(ctx, ledger, segment),
        }
    }

    /// Dispatches the end-of-leg check to the active engine.
    pub fn evaluate_end(&self, ctx: &TurnContext) -> Option<PlayerId> {
        match self {
            VariantState::Cricket(state) => state.evaluate_end(ctx),
            VariantState::Countdown(state) => state.evaluate_end(ctx),
        }
    }

    /// Players that have a score entry.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        match self {
            VariantState::Cricket(state) => state.players().keys().copied().collect(),
            VariantState::Countdown(state) => state.players().keys().copied().collect(),
        }
    }

    /// Current score of a player.
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        match self {
            VariantState::Cricket(state) => state.player(player).map(|p| *p.score()),
            VariantState::Countdown(state) => state.player(player).map(|p| *p.score()),
        }
    }

    /// Scores of every player.
    pub fn scores(&self) -> BTreeMap<PlayerId, u32> {
        self.player_ids()
            .into_iter()
            .filter_map(|id| self.score(id).map(|score| (id, score)))
            .collect()
    }
}
