//! One paired two-player game session and its shared state.
//!
//! The session is the single serialization point: both connection tasks
//! funnel every board mutation through [`Session::apply_move`], which holds
//! the session lock for the whole validate-through-mutate sequence.

use crate::error::GameError;
use crate::game::{Board, CELLS, Mark};
use crate::protocol::Outbox;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Result classification of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Move applied; the game continues.
    Accepted,
    /// Move applied and it completed a winning triple.
    Victory,
    /// Move applied and it filled the board with no winner.
    Tie,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only the first player is bound.
    AwaitingOpponent,
    /// Both players bound; turns alternate.
    InProgress,
    /// Terminal: a winning triple was completed.
    Won,
    /// Terminal: the board filled with no winner.
    Drawn,
}

/// Everything mutable in a session, guarded by one lock.
#[derive(Debug)]
struct SessionState {
    board: Board,
    current_turn: Mark,
    phase: Phase,
    /// Outbound channels by seat (X = 0, O = 1). This table is how each
    /// participant reaches its opponent's connection, so a vanished
    /// opponent degrades to a failed channel send rather than a dangling
    /// reference.
    seats: [Option<Outbox>; 2],
    /// How many players have ever been seated. Seats are assigned by
    /// arrival order, so a vacated X seat is never re-assigned.
    arrivals: usize,
}

/// A two-player game session: one board, two seats, one turn pointer.
///
/// Shared between the two connection tasks as `Arc<Session>`; dropped when
/// both tasks exit.
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    /// Creates an empty session awaiting its first player.
    #[instrument]
    pub fn new() -> Self {
        info!("creating game session");
        Self {
            state: Mutex::new(SessionState {
                board: Board::new(),
                current_turn: Mark::X,
                phase: Phase::AwaitingOpponent,
                seats: [None, None],
                arrivals: 0,
            }),
        }
    }

    /// Registers a player's outbound channel in arrival order.
    ///
    /// The first arrival becomes X and holds the first turn; the second
    /// becomes O and completes the pair. A third bind fails with
    /// [`GameError::SessionFull`]; the coordinator never sends one.
    #[instrument(skip(self, outbox))]
    pub fn bind(&self, outbox: Outbox) -> Result<Mark, GameError> {
        let mut state = self.lock();
        match state.arrivals {
            0 => {
                state.seats[Mark::X.seat()] = Some(outbox);
                state.arrivals = 1;
                info!(mark = %Mark::X, "seated first player");
                Ok(Mark::X)
            }
            1 => {
                state.seats[Mark::O.seat()] = Some(outbox);
                state.arrivals = 2;
                state.phase = Phase::InProgress;
                info!(mark = %Mark::O, "seated second player, session in progress");
                Ok(Mark::O)
            }
            _ => {
                warn!("bind attempted on a full session");
                Err(GameError::SessionFull)
            }
        }
    }

    /// Vacates a departing player's seat so opponent lookups stop
    /// resolving to a dead channel and the writer task can wind down.
    #[instrument(skip(self))]
    pub fn release(&self, mark: Mark) {
        let mut state = self.lock();
        state.seats[mark.seat()] = None;
        debug!(%mark, "seat released");
    }

    /// Applies `actor`'s move at `cell`.
    ///
    /// At most one call runs at a time per session; validation and
    /// mutation happen inside one critical section, so a rejected move
    /// never leaves a partial write. Rejections are recoverable and are
    /// reported back to the acting player only.
    #[instrument(skip(self))]
    pub fn apply_move(&self, cell: usize, actor: Mark) -> Result<Outcome, GameError> {
        let mut state = self.lock();

        if matches!(state.phase, Phase::Won | Phase::Drawn) {
            return Err(GameError::GameOver);
        }
        if actor != state.current_turn {
            debug!(%actor, current_turn = %state.current_turn, "turn violation");
            return Err(GameError::TurnViolation);
        }
        if state.seats[actor.opponent().seat()].is_none() {
            return Err(GameError::NoOpponent);
        }
        if cell >= CELLS {
            return Err(GameError::InvalidInput(cell.to_string()));
        }
        if state.board.is_occupied(cell) {
            return Err(GameError::CellOccupied(cell));
        }

        state.board.place(cell, actor);
        state.current_turn = actor.opponent();

        let outcome = if state.board.has_winner() {
            state.phase = Phase::Won;
            Outcome::Victory
        } else if state.board.is_full() {
            state.phase = Phase::Drawn;
            Outcome::Tie
        } else {
            Outcome::Accepted
        };

        info!(%actor, cell, ?outcome, "move applied");
        debug!(board = %state.board.render(), "board after move");
        Ok(outcome)
    }

    /// Looks up the opponent's outbound channel, if that seat is taken.
    pub fn opponent_outbox(&self, mark: Mark) -> Option<Outbox> {
        self.lock().seats[mark.opponent().seat()].clone()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // A poisoned lock means a panic inside a critical section; the
        // state is still usable for rejecting further moves.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
