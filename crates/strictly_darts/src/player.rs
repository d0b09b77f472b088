//! Player identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a player within a match, `0..N-1` in setup order.
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
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a player identifier.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the numeric index of this player.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
