//! Strictly Darts - command-line scorer
//!
//! Prints new legs, replays recorded action logs and scores hot-seat
//! matches from standard input.

#![warn(missing_docs)]

mod cli;
mod scoreboard;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use strictly_darts::{Action, GameType, MatchConfig, MatchSession, MatchState, Segment};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::New {
            config,
            game_type,
            players,
            starting_score,
        } => run_new(config, game_type, players, starting_score),
        Command::Replay {
            actions,
            config,
            pretty,
        } => run_replay(&actions, config, pretty),
        Command::Play { config } => run_play(config),
    }
}

/// Loads the configuration file if one was given, otherwise uses `fallback`.
fn load_config(path: Option<PathBuf>, fallback: MatchConfig) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(fallback),
    }
}

/// Print the initial state of a new leg
#[instrument]
fn run_new(
    config: Option<PathBuf>,
    game_type: GameType,
    players: u32,
    starting_score: u32,
) -> Result<()> {
    let fallback = MatchConfig::new(game_type, players).with_starting_score(starting_score);
    let config = load_config(config, fallback)?;
    let state = MatchState::setup(&config)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Replay an action log and print the final state
#[instrument(skip(config))]
fn run_replay(actions: &Path, config: Option<PathBuf>, pretty: bool) -> Result<()> {
    let config = load_config(config, MatchConfig::new(GameType::Cricket, 2))?;
    let content = std::fs::read_to_string(actions)
        .with_context(|| format!("Failed to read actions from {}", actions.display()))?;
    let actions: Vec<Action> =
        serde_json::from_str(&content).context("Action log is not a JSON array of actions")?;

    let session = replay(&config, &actions)?;
    let state = session.state();
    let json = if pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    println!("{}", json);
    Ok(())
}

/// Applies every action in order. Rejected actions are logged and skipped.
fn replay(config: &MatchConfig, actions: &[Action]) -> Result<MatchSession> {
    let mut session = MatchSession::new(config)?;
    for (index, action) in actions.iter().enumerate() {
        match session.apply(*action) {
            Ok(event) => debug!(index, ?event, "Action applied"),
            Err(e) if e.is_internal() => error!(index, error = %e, "Action failed"),
            Err(e) => warn!(index, error = %e, "Action rejected"),
        }
    }
    info!(
        actions = actions.len(),
        winner = ?session.state().winner(),
        "Replay finished"
    );
    Ok(session)
}

/// Score a hot-seat match from stdin
fn run_play(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config, MatchConfig::new(GameType::Cricket, 2))?;
    let session = MatchSession::new(&config)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    play(session, stdin.lock(), stdout.lock())
}

/// One line of hot-seat input.
#[derive(Debug, PartialEq)]
enum Input {
    Action(Action),
    Rematch,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.to_ascii_lowercase().as_str() {
        "end" | "next" => Some(Input::Action(Action::EndTurn)),
        "undo" | "u" => Some(Input::Action(Action::Undo)),
        "rematch" => Some(Input::Rematch),
        "quit" | "q" | "exit" => Some(Input::Quit),
        other => other.parse::<Segment>().ok().map(|s| Input::Action(Action::Throw(s))),
    }
}

/// Runs the hot-seat loop until `quit` or end of input.
fn play<R: BufRead, W: Write>(mut session: MatchSession, input: R, mut output: W) -> Result<()> {
    write!(output, "{}", scoreboard::render(&session))?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_input(line) {
            Some(Input::Quit) => break,
            Some(Input::Rematch) => {
                if let Err(e) = session.rematch() {
                    writeln!(output, "rematch failed: {}", e)?;
                }
            }
            Some(Input::Action(action)) => {
                if let Err(e) = session.apply(action) {
                    writeln!(output, "rejected: {}", e)?;
                }
            }
            None => {
                writeln!(output, "unknown input: {}", line)?;
                continue;
            }
        }
        write!(output, "{}", scoreboard::render(&session))?;
    }
    Ok(())
}
