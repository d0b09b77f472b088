//! Cricket: close 15 through 20 and the bull, score on open sections.

use super::{HitEffect, ScoringEngine};
use crate::segment::{BULL, CRICKET_MIN_SECTION};
use crate::{
    CommonPlayerData, MAX_MOVES_PER_TURN, MatchConfig, MoveError, PlayerId, Segment, TurnContext,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::{debug, error, instrument, warn};

/// Marks needed to close a section.
pub const CLOSED_MARKS: u32 = 3;

/// The seven sections that count in Cricket.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum CricketSection {
    /// Section 15.
    #[serde(rename = "15")]
    Fifteen,
    /// Section 16.
    #[serde(rename = "16")]
    Sixteen,
    /// Section 17.
    #[serde(rename = "17")]
    Seventeen,
    /// Section 18.
    #[serde(rename = "18")]
    Eighteen,
    /// Section 19.
    #[serde(rename = "19")]
    Nineteen,
    /// Section 20.
    #[serde(rename = "20")]
    Twenty,
    /// The bullseye.
    #[serde(rename = "bull")]
    Bull,
}

impl CricketSection {
    /// Maps a board section to a Cricket section, if it counts.
    pub fn from_section(section: u8) -> Option<Self> {
        match section {
            15 => Some(CricketSection::Fifteen),
            16 => Some(CricketSection::Sixteen),
            17 => Some(CricketSection::Seventeen),
            18 => Some(CricketSection::Eighteen),
            19 => Some(CricketSection::Nineteen),
            20 => Some(CricketSection::Twenty),
            BULL => Some(CricketSection::Bull),
            _ => None,
        }
    }

    /// Board section number (25 for the bull).
    pub fn section(self) -> u8 {
        match self {
            CricketSection::Fifteen => CRICKET_MIN_SECTION,
            CricketSection::Sixteen => 16,
            CricketSection::Seventeen => 17,
            CricketSection::Eighteen => 18,
            CricketSection::Nineteen => 19,
            CricketSection::Twenty => 20,
            CricketSection::Bull => BULL,
        }
    }
}

impl std::fmt::Display for CricketSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CricketSection::Bull => write!(f, "Bull"),
            other => write!(f, "{}", other.section()),
        }
    }
}

/// One player's Cricket score sheet.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CricketPlayer {
    /// Points scored.
    score: u32,
    /// Marks per section. Not capped at three.
    hits: BTreeMap<CricketSection, u32>,
}

impl CricketPlayer {
    /// A blank score sheet.
    pub fn new() -> Self {
        Self {
            score: 0,
            hits: CricketSection::iter().map(|section| (section, 0)).collect(),
        }
    }

    /// Marks on a section.
    pub fn marks(&self, section: CricketSection) -> u32 {
        self.hits.get(&section).copied().unwrap_or(0)
    }

    /// True once the section has three or more marks.
    pub fn has_closed(&self, section: CricketSection) -> bool {
        self.marks(section) >= CLOSED_MARKS
    }

    /// True once every section is closed.
    pub fn has_closed_all(&self) -> bool {
        CricketSection::iter().all(|section| self.has_closed(section))
    }
}

impl Default for CricketPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Score state of a Cricket leg.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CricketState {
    /// Score sheet per player.
    players: BTreeMap<PlayerId, CricketPlayer>,
}

impl CricketState {
    /// Score sheet of a player.
    pub fn player(&self, id: PlayerId) -> Option<&CricketPlayer> {
        self.players.get(&id)
    }

    /// True when every player other than `current` has closed `section`.
    pub fn closed_by_others(&self, current: PlayerId, section: CricketSection) -> bool {
        self.players
            .iter()
            .filter(|(id, _)| **id != current)
            .all(|(_, player)| player.has_closed(section))
    }
}

impl ScoringEngine for CricketState {
    #[instrument(skip(_config))]
    fn on_leg_setup(_config: &MatchConfig, play_order: &[PlayerId]) -> Self {
        Self {
            players: play_order
                .iter()
                .map(|id| (*id, CricketPlayer::new()))
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

        // Outside 15-20 and the bull: the dart is spent but scores nothing.
        let Some(section) = CricketSection::from_section(segment.section()) else {
            ledger.record_throw(segment);
            debug!("Hit outside the cricket sections");
            return Ok(HitEffect::Noop);
        };

        let closed_by_others = self.closed_by_others(current, section);
        let Some(player) = self.players.get_mut(&current) else {
            error!("Cricket score sheet missing for current player");
            return Err(MoveError::MissingPlayerData(current, "cricket"));
        };

        let previous = player.marks(section);
        let needed_to_close = CLOSED_MARKS.saturating_sub(previous);
        let marks = segment.multiplier().factor();
        let new_count = previous + marks;

        let points = if closed_by_others || new_count < CLOSED_MARKS {
            0
        } else {
            marks.saturating_sub(needed_to_close) * u32::from(section.section())
        };

        player.hits.insert(section, new_count);
        player.score += points;
        ledger.record_throw(segment);

        debug!(%section, previous, new_count, points, "Cricket hit applied");
        Ok(HitEffect::Counted { points })
    }

    #[instrument(skip(self), fields(player = %ctx.current_player()))]
    fn evaluate_end(&self, ctx: &TurnContext) -> Option<PlayerId> {
        let current = *ctx.current_player();
        let player = self.players.get(&current)?;

        if !player.has_closed_all() {
            return None;
        }

        let outscored = self
            .players
            .iter()
            .any(|(id, other)| *id != current && other.score > player.score);

        if outscored { None } else { Some(current) }
    }
}
