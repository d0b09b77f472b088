//! Local turn-sequencing runtime.
//!
//! In a networked match the scheduling and replication layer decides whose
//! turn it is. `MatchSession` plays that role inside a single process: it
//! cycles through the play order, counts moves, auto-advances after the
//! third dart and keeps the snapshot needed to undo one throw.
//!
//! A bust counts as a full turn, so with `auto_end_turn` the busting dart
//! also hands the board to the next player.

use super::invariants::{InvariantSet, MatchInvariants};
use super::variant::HitEffect;
use super::{
    Action, ConfigError, MAX_MOVES_PER_TURN, MatchConfig, MatchState, MoveError, PlayerId,
    SegmentId, TurnContext,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A dart was applied.
    Hit {
        /// Effect on the score state.
        effect: HitEffect,
        /// Whether the turn ended automatically after this dart.
        turn_ended: bool,
    },
    /// The turn ended and `next` is up.
    TurnEnded {
        /// Player to throw next.
        next: PlayerId,
    },
    /// The last throw was reverted.
    Undone,
}

#[derive(Debug, Clone)]
struct Snapshot {
    state: MatchState,
    num_moves: u8,
}

/// A match driven locally, one action at a time.
#[derive(Debug, Clone)]
pub struct MatchSession {
    state: MatchState,
    current_index: usize,
    current_player: PlayerId,
    num_moves: u8,
    previous: Option<Snapshot>,
}

impl MatchSession {
    /// Sets up a new match from a configuration.
    #[instrument(skip(config))]
    pub fn new(config: &MatchConfig) -> Result<Self, ConfigError> {
        let state = MatchState::setup(config)?;
        Self::from_state(state)
    }

    /// Drives an existing leg, starting with its starting player.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the starting player is not in the play
    /// order or the state breaks a match invariant, as a state read from
    /// an untrusted source may.
    #[instrument(skip(state))]
    pub fn from_state(state: MatchState) -> Result<Self, ConfigError> {
        let index = *state.starting_player_index();
        let Some(current_player) = state.play_order().get(index).copied() else {
            return Err(ConfigError::new(format!(
                "Starting player index {} is out of range for {} players",
                index,
                state.num_players()
            )));
        };

        MatchInvariants::check_all(&state).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            ConfigError::new(format!("Inconsistent match state: {}", descriptions))
        })?;

        Ok(Self {
            state,
            current_index: index,
            current_player,
            num_moves: 0,
            previous: None,
        })
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Moves made in the current turn.
    pub fn num_moves(&self) -> u8 {
        self.num_moves
    }

    /// Turn context handed to the engine for the next hit.
    pub fn context(&self) -> TurnContext {
        TurnContext::new(self.current_player(), self.num_moves)
    }

    /// Applies an action for the current player.
    ///
    /// A rejected action leaves the session unchanged.
    #[instrument(skip(self), fields(player = %self.current_player(), moves = self.num_moves))]
    pub fn apply(&mut self, action: Action) -> Result<SessionEvent, MoveError> {
        match action {
            Action::Throw(segment) if segment.id() == SegmentId::ResetButton => self.end_turn(),
            Action::Throw(segment) => {
                let transition = self.state.apply_hit(&self.context(), segment)?;
                let effect = transition.effect();

                self.previous = Some(Snapshot {
                    state: std::mem::replace(&mut self.state, transition.into_state()),
                    num_moves: self.num_moves,
                });
                self.num_moves += 1;

                let turn_spent = usize::from(self.num_moves) >= MAX_MOVES_PER_TURN
                    || effect == HitEffect::Bust;
                let auto_end =
                    *self.state.config().auto_end_turn() && turn_spent && !self.state.is_over();
                if auto_end {
                    self.end_turn()?;
                }

                Ok(SessionEvent::Hit {
                    effect,
                    turn_ended: auto_end,
                })
            }
            Action::EndTurn => self.end_turn(),
            Action::Undo => self.undo(),
        }
    }

    /// Starts a new leg with the same players and order.
    #[instrument(skip(self))]
    pub fn rematch(&mut self) -> Result<(), ConfigError> {
        info!("Rematch");
        *self = Self::from_state(self.state.restart())?;
        Ok(())
    }

    fn end_turn(&mut self) -> Result<SessionEvent, MoveError> {
        let state = self.state.on_turn_end(self.current_player)?;
        let next_index = (self.current_index + 1)
            .checked_rem(state.num_players())
            .unwrap_or(0);
        let Some(next) = state.play_order().get(next_index).copied() else {
            error!(next_index, "Play order has no next player");
            return Err(MoveError::MissingPlayerData(self.current_player, "play order"));
        };

        self.state = state;
        self.current_index = next_index;
        self.current_player = next;
        self.num_moves = 0;
        self.previous = None;

        debug!(%next, "Next player up");
        Ok(SessionEvent::TurnEnded { next })
    }

    fn undo(&mut self) -> Result<SessionEvent, MoveError> {
        if self.state.is_over() {
            warn!("Undo after the leg was decided");
            return Err(MoveError::LegOver);
        }
        let Some(snapshot) = self.previous.take() else {
            warn!("Nothing to undo");
            return Err(MoveError::NothingToUndo);
        };

        self.state = snapshot.state;
        self.num_moves = snapshot.num_moves;
        debug!("Throw undone");
        Ok(SessionEvent::Undone)
    }
}
