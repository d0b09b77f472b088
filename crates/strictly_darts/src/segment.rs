//! Dartboard segments: where a single dart landed and what it is worth.
//!
//! This module owns the section constants every variant engine reads.
//! Engines never compare against bare section literals.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Section constants
// ─────────────────────────────────────────────────────────────

/// Section reported for a dart that landed off the scoring area.
pub const MISS_SECTION: u8 = 0;

/// Highest numbered wedge on the board.
pub const MAX_NUMBERED_SECTION: u8 = 20;

/// Section number of the bullseye.
pub const BULL: u8 = 25;

/// Highest section that can carry points.
pub const SCORING_CEILING: u8 = BULL;

/// Lowest section that counts in Cricket.
pub const CRICKET_MIN_SECTION: u8 = 15;

/// Reserved section of the reset / end-turn button.
pub const RESET_BUTTON_SECTION: u8 = 26;

/// Reserved section of the bust marker used to pad a busted turn.
pub const BUST_SECTION: u8 = 27;

// ─────────────────────────────────────────────────────────────
//  Identifier and multiplier
// ─────────────────────────────────────────────────────────────

/// What kind of input a segment represents.
///
/// Sentinels (`ResetButton`, `Bust`) never score. Callers branch on the
/// identifier before treating a segment as a dart on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SegmentId {
    /// A dart on the board (including a miss).
    Board,
    /// The reset button, used to end a turn early.
    ResetButton,
    /// Placeholder for a throw forfeited by a bust.
    Bust,
}

/// Ring multiplier of a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Multiplier {
    /// Single ring (1x).
    Single,
    /// Double ring (2x).
    Double,
    /// Triple ring (3x).
    Triple,
}

impl Multiplier {
    /// Numeric factor, also the number of Cricket marks the hit is worth.
    pub fn factor(self) -> u32 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }

    fn prefix(self) -> char {
        match self {
            Multiplier::Single => 'S',
            Multiplier::Double => 'D',
            Multiplier::Triple => 'T',
        }
    }

    fn label(self) -> &'static str {
        match self {
            Multiplier::Single => "Single",
            Multiplier::Double => "Double",
            Multiplier::Triple => "Triple",
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Segment
// ─────────────────────────────────────────────────────────────

/// A single dart landing, or a sentinel input from the board UI.
///
/// Segments are immutable values. `value` is computed once by the
/// constructor: `section * multiplier` for board segments, 0 for sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Segment {
    id: SegmentId,
    section: u8,
    multiplier: Multiplier,
    value: u32,
}

impl Segment {
    /// Builds a segment from its identifier, section and multiplier.
    ///
    /// Sentinel identifiers ignore `section` and `multiplier` and take their
    /// reserved section with a value of 0.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError`] for sections that do not exist on a board
    /// (21-24, above the bull), for a triple bull, or for a doubled miss.
    #[track_caller]
    #[instrument]
    pub fn new(id: SegmentId, section: u8, multiplier: Multiplier) -> Result<Self, SegmentError> {
        match id {
            SegmentId::ResetButton => Ok(Self::sentinel(id, RESET_BUTTON_SECTION)),
            SegmentId::Bust => Ok(Self::sentinel(id, BUST_SECTION)),
            SegmentId::Board => {
                if section > MAX_NUMBERED_SECTION && section != BULL {
                    return Err(SegmentError::new(format!(
                        "Section {} is not on the board",
                        section
                    )));
                }
                if section == BULL && multiplier == Multiplier::Triple {
                    return Err(SegmentError::new("The bull has no triple ring"));
                }
                if section == MISS_SECTION && multiplier != Multiplier::Single {
                    return Err(SegmentError::new("A miss cannot carry a multiplier"));
                }
                Ok(Self {
                    id,
                    section,
                    multiplier,
                    value: u32::from(section) * multiplier.factor(),
                })
            }
        }
    }

    /// Builds a board segment.
    #[track_caller]
    pub fn board(section: u8, multiplier: Multiplier) -> Result<Self, SegmentError> {
        Self::new(SegmentId::Board, section, multiplier)
    }

    /// A single in the given section.
    #[track_caller]
    pub fn single(section: u8) -> Result<Self, SegmentError> {
        Self::board(section, Multiplier::Single)
    }

    /// A double in the given section.
    #[track_caller]
    pub fn double(section: u8) -> Result<Self, SegmentError> {
        Self::board(section, Multiplier::Double)
    }

    /// A triple in the given section.
    #[track_caller]
    pub fn triple(section: u8) -> Result<Self, SegmentError> {
        Self::board(section, Multiplier::Triple)
    }

    /// A dart off the scoring area.
    pub fn miss() -> Self {
        Self {
            id: SegmentId::Board,
            section: MISS_SECTION,
            multiplier: Multiplier::Single,
            value: 0,
        }
    }

    /// The bust marker sentinel.
    pub fn bust() -> Self {
        Self::sentinel(SegmentId::Bust, BUST_SECTION)
    }

    /// The reset / end-turn button sentinel.
    pub fn reset_button() -> Self {
        Self::sentinel(SegmentId::ResetButton, RESET_BUTTON_SECTION)
    }

    fn sentinel(id: SegmentId, section: u8) -> Self {
        Self {
            id,
            section,
            multiplier: Multiplier::Single,
            value: 0,
        }
    }

    /// Returns the identifier.
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Returns the section number.
    pub fn section(&self) -> u8 {
        self.section
    }

    /// Returns the multiplier.
    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// Returns the point value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// True for the reset button and the bust marker.
    pub fn is_sentinel(&self) -> bool {
        self.id != SegmentId::Board
    }

    /// True for a board dart that landed off the scoring area.
    pub fn is_miss(&self) -> bool {
        self.id == SegmentId::Board && self.section == MISS_SECTION
    }

    /// Compact label such as `T20`, `DB` or `MISS`.
    pub fn short_name(&self) -> String {
        match self.id {
            SegmentId::ResetButton => "RESET".to_string(),
            SegmentId::Bust => "BUST".to_string(),
            SegmentId::Board if self.section == MISS_SECTION => "MISS".to_string(),
            SegmentId::Board if self.section == BULL => match self.multiplier {
                Multiplier::Double => "DB".to_string(),
                _ => "SB".to_string(),
            },
            SegmentId::Board => format!("{}{}", self.multiplier.prefix(), self.section),
        }
    }

    /// Human readable label such as `Triple 20` or `Double Bull`.
    pub fn long_name(&self) -> String {
        match self.id {
            SegmentId::ResetButton => "Reset".to_string(),
            SegmentId::Bust => "Bust".to_string(),
            SegmentId::Board if self.section == MISS_SECTION => "Miss".to_string(),
            SegmentId::Board if self.section == BULL => {
                format!("{} Bull", self.multiplier.label())
            }
            SegmentId::Board => format!("{} {}", self.multiplier.label(), self.section),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for Segment {
    type Err = SegmentError;

    /// Parses short names, case-insensitively.
    ///
    /// Accepts `S20`/`20`, `D20`, `T20`, `SB`/`25`, `DB`/`D25`, `MISS`/`M`/`0`,
    /// `BUST` and `RESET`.
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        match label.as_str() {
            "MISS" | "M" => return Ok(Self::miss()),
            "BUST" => return Ok(Self::bust()),
            "RESET" => return Ok(Self::reset_button()),
            "SB" | "BULL" => return Self::single(BULL),
            "DB" => return Self::double(BULL),
            _ => {}
        }

        let (multiplier, digits) = match label.chars().next() {
            Some('S') => (Multiplier::Single, &label[1..]),
            Some('D') => (Multiplier::Double, &label[1..]),
            Some('T') => (Multiplier::Triple, &label[1..]),
            _ => (Multiplier::Single, label.as_str()),
        };

        let section = digits
            .parse::<u8>()
            .map_err(|_| SegmentError::new(format!("Unrecognized segment: {}", s.trim())))?;
        Self::board(section, multiplier)
    }
}

impl TryFrom<String> for Segment {
    type Error = SegmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Segment> for String {
    fn from(segment: Segment) -> Self {
        segment.short_name()
    }
}

// ─────────────────────────────────────────────────────────────
//  Errors
// ─────────────────────────────────────────────────────────────

/// Segment construction error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Segment error: {} at {}:{}", message, file, line)]
pub struct SegmentError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SegmentError {
    /// Creates a new segment error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_section_times_multiplier() {
        assert_eq!(Segment::single(20).unwrap().value(), 20);
        assert_eq!(Segment::double(20).unwrap().value(), 40);
        assert_eq!(Segment::triple(20).unwrap().value(), 60);
        assert_eq!(Segment::double(BULL).unwrap().value(), 50);
    }

    #[test]
    fn test_sentinels_are_worth_nothing() {
        for segment in [Segment::bust(), Segment::reset_button()] {
            assert!(segment.is_sentinel());
            assert_eq!(segment.value(), 0);
            assert!(segment.section() > SCORING_CEILING);
        }
    }

    #[test]
    fn test_sentinel_ignores_section_and_multiplier() {
        let segment = Segment::new(SegmentId::Bust, 20, Multiplier::Triple).unwrap();
        assert_eq!(segment, Segment::bust());
    }

    #[test]
    fn test_miss_is_a_board_segment() {
        let miss = Segment::miss();
        assert!(!miss.is_sentinel());
        assert!(miss.is_miss());
        assert_eq!(miss.value(), 0);
        assert_eq!(Segment::single(MISS_SECTION).unwrap(), miss);
    }

    #[test]
    fn test_rejects_sections_off_the_board() {
        assert!(Segment::single(21).is_err());
        assert!(Segment::single(24).is_err());
        assert!(Segment::single(26).is_err());
        assert!(Segment::triple(BULL).is_err());
        assert!(Segment::double(MISS_SECTION).is_err());
    }

    #[test]
    fn test_names() {
        let t20 = Segment::triple(20).unwrap();
        assert_eq!(t20.short_name(), "T20");
        assert_eq!(t20.long_name(), "Triple 20");
        assert_eq!(Segment::double(BULL).unwrap().short_name(), "DB");
        assert_eq!(Segment::single(BULL).unwrap().long_name(), "Single Bull");
        assert_eq!(Segment::bust().to_string(), "BUST");
    }

    #[test]
    fn test_parse_short_names() {
        assert_eq!("t20".parse::<Segment>().unwrap(), Segment::triple(20).unwrap());
        assert_eq!("20".parse::<Segment>().unwrap(), Segment::single(20).unwrap());
        assert_eq!("D25".parse::<Segment>().unwrap(), Segment::double(BULL).unwrap());
        assert_eq!("sb".parse::<Segment>().unwrap(), Segment::single(BULL).unwrap());
        assert_eq!("0".parse::<Segment>().unwrap(), Segment::miss());
        assert_eq!("reset".parse::<Segment>().unwrap(), Segment::reset_button());
        assert!("X7".parse::<Segment>().is_err());
        assert!("T25".parse::<Segment>().is_err());
    }

    #[test]
    fn test_serializes_as_short_name() {
        let json = serde_json::to_string(&Segment::double(16).unwrap()).unwrap();
        assert_eq!(json, "\"D16\"");
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Segment::double(16).unwrap());
        assert!(serde_json::from_str::<Segment>("\"D22\"").is_err());
    }
}
