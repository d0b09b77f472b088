//! Countdown ("01"): subtract every dart from the starting score, finish on
//! exactly zero, bust on anything below.

use super::{HitEffect, ScoringEngine};
use crate::segment::SCORING_CEILING;
use crate::{
    CommonPlayerData, MAX_MOVES_PER_TURN, MatchConfig, MoveError, PlayerId, Segment, TurnContext,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, warn};

/// One player's remaining score.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CountdownPlayer {
    /// Points left to reach zero.
    score: u32,
}

/// Score state of a countdown leg.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CountdownState {
    /// Score every player started the leg with.
    starting_score: u32,
    /// Remaining score per player.
    players: BTreeMap<PlayerId, CountdownPlayer>,
}

impl CountdownState {
    /// Remaining score of a player.
    pub fn player(&self, id: PlayerId) -> Option<&CountdownPlayer> {
        self.players.get(&id)
    }
}

impl ScoringEngine for CountdownState {
    #[instrument(skip(config), fields(starting_score = config.starting_score()))]
    fn on_leg_setup(config: &MatchConfig, play_order: &[PlayerId]) -> Self {
        let starting_score = *config.starting_score();
        Self {
            starting_score,
            players: play_order
                .iter()
                .map(|id| {
                    (
                        *id,
                        CountdownPlayer {
                            score: starting_score,
                        },
                    )
                })
                .collect(),
        }
    }

    #[instrument(skip(self, ledger), fields(player = %ctx.current_player(), segment = %segment))]
    fn apply_hit(
        &mut self,
        ctx: &TurnContext,
        ledger: &mut CommonPlayerData,
        segment: Segment,
    ) -> Result<HitEffect, MoveError> {
        let current = *ctx.current_player();
        if usize::from(*ctx.num_moves()) >= MAX_MOVES_PER_TURN {
            warn!("Throw limit reached");
            return Err(MoveError::TurnComplete(current));
        }

        let Some(player) = self.players.get_mut(&current) else {
            error!("Countdown score missing for current player");
            return Err(MoveError::MissingPlayerData(current, "countdown"));
        };

        // Reset button, bust marker and anything above the bull.
        if segment.is_sentinel() || segment.section() > SCORING_CEILING {
            debug!("Ignoring non-scoring input");
            return Ok(HitEffect::Noop);
        }

        // Darts left in the turn but the turn was already busted.
        if ledger.is_full() {
            warn!("Turn already busted, ignoring throw");
            return Ok(HitEffect::Noop);
        }

        ledger.record_throw(segment);

        if segment.is_miss() {
            debug!("Miss recorded");
            return Ok(HitEffect::Noop);
        }

        if let Some(remaining) = player.score.checked_sub(segment.value()) {
            player.score = remaining;
            debug!(remaining, "Countdown hit applied");
            return Ok(HitEffect::Counted {
                points: segment.value(),
            });
        }

        // Bust: the busting dart was never deducted, the earlier ones were.
        let earlier = &ledger.throws()[..ledger.len() - 1];
        let refund: u32 = earlier.iter().map(Segment::value).sum();
        player.score += refund;

        while !ledger.is_full() {
            ledger.record_throw(Segment::bust());
        }

        info!(score = player.score, refund, "Bust");
        Ok(HitEffect::Bust)
    }

    #[instrument(skip(self), fields(player = %ctx.current_player()))]
    fn evaluate_end(&self, ctx: &TurnContext) -> Option<PlayerId> {
        let current = *ctx.current_player();
        self.players
            .get(&current)
            .filter(|player| player.score == 0)
            .map(|_| current)
    }
}
