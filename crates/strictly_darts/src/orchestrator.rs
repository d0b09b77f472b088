//! Phase and match orchestration.
//!
//! Builds legs, routes hits to the active variant, runs the end-of-leg
//! check and the turn-end hook. Every operation takes the current state by
//! reference and returns a new one; a rejection leaves the input untouched.

use super::contracts::{Contract, HitContract};
use super::variant::{HitEffect, VariantState};
use super::{
    CommonPlayerData, ConfigError, GameType, MatchConfig, MatchState, MoveError, Phase, PlayerId,
    Segment, TurnContext,
};
use tracing::{debug, error, info, instrument, warn};

/// Accepted hit: the resulting state and what the hit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    state: MatchState,
    effect: HitEffect,
}

impl Transition {
    /// State after the hit.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// What the hit did to the score state.
    pub fn effect(&self) -> HitEffect {
        self.effect
    }

    /// True when the hit was recorded or ignored without scoring.
    pub fn is_noop(&self) -> bool {
        self.effect.is_noop()
    }

    /// Consumes the transition, returning the new state.
    pub fn into_state(self) -> MatchState {
        self.state
    }
}

impl MatchState {
    /// Builds the initial state of a leg.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    #[instrument(
        skip(config),
        fields(game_type = %config.game_type(), players = config.num_players())
    )]
    pub fn setup(config: &MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let play_order = config.resolved_play_order();
        let variant = VariantState::on_leg_setup(config, &play_order);
        let common_player_data = play_order
            .iter()
            .map(|id| (*id, CommonPlayerData::new()))
            .collect();

        debug!(?play_order, "Leg set up");
        Ok(Self {
            config: config.clone(),
            phase: Phase::InGame,
            variant,
            starting_player_index: *config.starting_player_index(),
            play_order,
            turn_number: 0,
            winner: None,
            common_player_data,
            last_hit: None,
        })
    }

    /// Builds a leg for `num_players` players with default settings.
    #[instrument]
    pub fn with_players(game_type: GameType, num_players: u32) -> Result<Self, ConfigError> {
        Self::setup(&MatchConfig::new(game_type, num_players))
    }

    /// Starts a fresh leg with the same configuration (rematch).
    #[instrument(skip(self))]
    pub fn restart(&self) -> Self {
        let variant = VariantState::on_leg_setup(&self.config, &self.play_order);
        let common_player_data = self
            .play_order
            .iter()
            .map(|id| (*id, CommonPlayerData::new()))
            .collect();

        info!(previous_winner = ?self.winner, "Leg restarted");
        Self {
            config: self.config.clone(),
            phase: Phase::InGame,
            variant,
            play_order: self.play_order.clone(),
            starting_player_index: self.starting_player_index,
            turn_number: 0,
            winner: None,
            common_player_data,
            last_hit: None,
        }
    }

    /// Applies one dart thrown by `ctx.current_player()`.
    ///
    /// Returns the new state together with the [`HitEffect`], or the reason
    /// the hit was rejected. Winners are evaluated after every accepted hit.
    #[instrument(skip(self), fields(player = %ctx.current_player(), moves = ctx.num_moves()))]
    pub fn apply_hit(&self, ctx: &TurnContext, segment: Segment) -> Result<Transition, MoveError> {
        HitContract::pre(self, ctx).inspect_err(|e| warn!(error = %e, "Hit rejected"))?;

        let current = *ctx.current_player();
        let mut next = self.clone();

        let Some(ledger) = next.common_player_data.get_mut(&current) else {
            error!("Throw ledger missing for current player");
            return Err(MoveError::MissingPlayerData(current, "throw ledger"));
        };
        let recorded_before = ledger.len();

        let effect = next
            .variant
            .apply_hit(ctx, ledger, segment)
            .inspect_err(|e| warn!(error = %e, "Hit rejected"))?;

        if ledger.len() > recorded_before {
            next.last_hit = Some(segment);
        }

        if let Some(winner) = next.variant.evaluate_end(ctx) {
            next.declare_winner(winner);
        }

        #[cfg(debug_assertions)]
        HitContract::post(self, &next)?;

        debug!(?effect, "Hit accepted");
        Ok(Transition {
            state: next,
            effect,
        })
    }

    /// Turn-end hook: clears the player's throw ledger for the next turn.
    ///
    /// # Errors
    ///
    /// Rejects unknown players and turns ended after the leg is decided.
    #[instrument(skip(self))]
    pub fn on_turn_end(&self, player: PlayerId) -> Result<Self, MoveError> {
        if self.is_over() {
            warn!("Turn ended after the leg was decided");
            return Err(MoveError::LegOver);
        }
        if !self.play_order.contains(&player) {
            warn!("Turn ended for a player outside the match");
            return Err(MoveError::UnknownPlayer(player));
        }

        let mut next = self.clone();
        let Some(ledger) = next.common_player_data.get_mut(&player) else {
            error!("Throw ledger missing at turn end");
            return Err(MoveError::MissingPlayerData(player, "throw ledger"));
        };
        ledger.clear_for_new_turn();
        next.turn_number += 1;

        debug!(turn_number = next.turn_number, "Turn ended");
        Ok(next)
    }

    fn declare_winner(&mut self, winner: PlayerId) {
        if self.winner.is_none() {
            info!(%winner, game_type = %self.game_type(), "Leg won");
            self.winner = Some(winner);
            self.phase = Phase::GameOver;
        }
    }
}
