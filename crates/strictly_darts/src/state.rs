//! Match state shared by every peer of a match.
//!
//! All maps are ordered so that two peers applying the same actions in the
//! same order serialize byte-identical states.

use super::variant::VariantState;
use super::{CommonPlayerData, GameType, MAX_THROWS_PER_TURN, MatchConfig, PlayerId, Segment};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Moves the runtime allows per turn before it advances to the next player.
pub const MAX_MOVES_PER_TURN: usize = MAX_THROWS_PER_TURN;

/// Phase of the current leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Darts are being thrown.
    InGame,
    /// A winner was decided; nothing more is processed until a restart.
    GameOver,
}

/// Turn information the scheduling runtime passes with every hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, new, Serialize, Deserialize)]
pub struct TurnContext {
    /// Player whose turn it is.
    current_player: PlayerId,
    /// Moves already made in this turn.
    num_moves: u8,
}

/// Complete state of one leg.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchState {
    /// Configuration the leg was set up from.
    pub(crate) config: MatchConfig,
    /// Current phase.
    pub(crate) phase: Phase,
    /// Score state of the active variant.
    pub(crate) variant: VariantState,
    /// Order in which players take turns.
    pub(crate) play_order: Vec<PlayerId>,
    /// Index into `play_order` of the player who throws first.
    pub(crate) starting_player_index: usize,
    /// Turns completed so far in this leg.
    pub(crate) turn_number: u32,
    /// Winner of the leg, once decided.
    pub(crate) winner: Option<PlayerId>,
    /// Throw ledger per player.
    pub(crate) common_player_data: BTreeMap<PlayerId, CommonPlayerData>,
    /// Most recent throw recorded by any player.
    pub(crate) last_hit: Option<Segment>,
}

impl MatchState {
    /// Active variant.
    pub fn game_type(&self) -> GameType {
        self.variant.game_type()
    }

    /// Player who throws first in this leg.
    pub fn starting_player(&self) -> Option<PlayerId> {
        self.play_order.get(self.starting_player_index).copied()
    }

    /// Number of configured players.
    pub fn num_players(&self) -> usize {
        self.play_order.len()
    }

    /// True once a winner is decided.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.phase == Phase::GameOver
    }

    /// Throw ledger of a player.
    pub fn ledger(&self, player: PlayerId) -> Option<&CommonPlayerData> {
        self.common_player_data.get(&player)
    }

    /// Current score of a player in the active variant.
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.variant.score(player)
    }

    /// Serializes the state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
