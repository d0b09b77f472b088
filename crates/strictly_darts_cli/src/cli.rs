//! Command-line interface for strictly_darts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_darts::GameType;

/// Strictly Darts - deterministic darts scoring for Cricket and 01
#[derive(Parser, Debug)]
#[command(name = "strictly_darts")]
#[command(about = "Deterministic darts scoring for Cricket and 01", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the initial state of a new leg as JSON
    New {
        /// Match configuration file (TOML). Overrides the other flags.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Variant to play (cricket, countdown or 01)
        #[arg(short, long, default_value = "cricket")]
        game_type: GameType,

        /// Number of players
        #[arg(short, long, default_value = "2")]
        players: u32,

        /// Countdown starting score
        #[arg(short, long, default_value = "501")]
        starting_score: u32,
    },

    /// Replay a JSON action log and print the final state
    Replay {
        /// JSON array of actions
        #[arg(short, long)]
        actions: PathBuf,

        /// Match configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the resulting state
        #[arg(long)]
        pretty: bool,
    },

    /// Score a hot-seat match from standard input
    Play {
        /// Match configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
