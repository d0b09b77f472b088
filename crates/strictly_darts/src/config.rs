//! Match configuration.

use super::PlayerId;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Starting score of a countdown leg when none is configured.
pub const DEFAULT_STARTING_SCORE: u32 = 501;

/// Which darts variant a match plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameType {
    /// Close 15-20 and bull, score on sections the opponents have open.
    Cricket,
    /// Count down from the starting score to exactly zero ("01").
    #[serde(alias = "01")]
    #[strum(to_string = "countdown", serialize = "01")]
    Countdown,
}

/// Configuration for a match, as read by setup and the local runtime.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Variant to play.
    game_type: GameType,

    /// Number of players, identified `0..num_players`.
    num_players: u32,

    /// Starting score of every player in a countdown leg.
    #[serde(default = "default_starting_score")]
    starting_score: u32,

    /// Order in which players take turns. Defaults to setup order.
    #[serde(default)]
    #[setters(strip_option)]
    play_order: Option<Vec<PlayerId>>,

    /// Index into the play order of the player who throws first.
    #[serde(default)]
    starting_player_index: usize,

    /// Whether the local runtime ends a turn after the third dart.
    #[serde(default = "default_auto_end_turn")]
    auto_end_turn: bool,
}

fn default_starting_score() -> u32 {
    DEFAULT_STARTING_SCORE
}

fn default_auto_end_turn() -> bool {
    true
}

impl MatchConfig {
    /// Creates a configuration with default play order and scores.
    #[instrument]
    pub fn new(game_type: GameType, num_players: u32) -> Self {
        Self {
            game_type,
            num_players,
            starting_score: default_starting_score(),
            play_order: None,
            starting_player_index: 0,
            auto_end_turn: default_auto_end_turn(),
        }
    }

    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(game_type = %config.game_type, players = config.num_players, "Match config loaded");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a playable match.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::new("A match needs at least one player"));
        }
        if self.starting_score == 0 {
            return Err(ConfigError::new("Starting score must be positive"));
        }

        let order = self.resolved_play_order();
        if order.len() != self.num_players as usize {
            return Err(ConfigError::new(format!(
                "Play order lists {} players but the match has {}",
                order.len(),
                self.num_players
            )));
        }
        let distinct: BTreeSet<PlayerId> = order.iter().copied().collect();
        if distinct.len() != order.len() || order.iter().any(|id| id.index() >= self.num_players) {
            return Err(ConfigError::new(format!(
                "Play order must name each player 0..{} exactly once",
                self.num_players
            )));
        }

        if self.starting_player_index >= order.len() {
            return Err(ConfigError::new(format!(
                "Starting player index {} is out of range",
                self.starting_player_index
            )));
        }
        Ok(())
    }

    /// Play order with the default (setup order) filled in.
    pub fn resolved_play_order(&self) -> Vec<PlayerId> {
        match &self.play_order {
            Some(order) => order.clone(),
            None => (0..self.num_players).map(PlayerId::new).collect(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
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
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::new(GameType::Countdown, 2);
        assert_eq!(*config.starting_score(), 501);
        assert!(*config.auto_end_turn());
        assert_eq!(
            config.resolved_play_order(),
            vec![PlayerId::new(0), PlayerId::new(1)]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = MatchConfig::from_toml(
            r#"
            game_type = "01"
            num_players = 3
            starting_score = 301
            play_order = [2, 0, 1]
            starting_player_index = 1
            "#,
        )
        .unwrap();
        assert_eq!(*config.game_type(), GameType::Countdown);
        assert_eq!(*config.starting_score(), 301);
        assert_eq!(config.resolved_play_order()[0], PlayerId::new(2));
        assert_eq!(*config.starting_player_index(), 1);
    }

    #[test]
    fn test_rejects_bad_play_order() {
        let config = MatchConfig::new(GameType::Cricket, 2)
            .with_play_order(vec![PlayerId::new(0), PlayerId::new(0)]);
        assert!(config.validate().is_err());

        let config = MatchConfig::new(GameType::Cricket, 2)
            .with_play_order(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(config.validate().is_err());

        let config = MatchConfig::new(GameType::Cricket, 2).with_play_order(vec![PlayerId::new(1)]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_match_and_bad_start() {
        assert!(MatchConfig::new(GameType::Cricket, 0).validate().is_err());
        assert!(
            MatchConfig::new(GameType::Cricket, 2)
                .with_starting_player_index(2)
                .validate()
                .is_err()
        );
        assert!(
            MatchConfig::new(GameType::Countdown, 2)
                .with_starting_score(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_game_type_names() {
        assert_eq!("cricket".parse::<GameType>().unwrap(), GameType::Cricket);
        assert_eq!("01".parse::<GameType>().unwrap(), GameType::Countdown);
        assert_eq!("Countdown".parse::<GameType>().unwrap(), GameType::Countdown);
        assert_eq!(GameType::Countdown.to_string(), "countdown");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "game_type = \"cricket\"\nnum_players = 4").unwrap();

        let config = MatchConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.game_type(), GameType::Cricket);
        assert_eq!(*config.num_players(), 4);
    }

    #[test]
    fn test_missing_file() {
        let err = MatchConfig::from_file("/nonexistent/match.toml").unwrap_err();
        assert!(err.message.contains("Failed to read"));
    }
}
