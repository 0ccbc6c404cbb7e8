//! Error taxonomy for move handling and channel I/O.

use derive_more::{Display, Error};

/// Everything that can go wrong while handling a player's directive.
///
/// The move-rejection variants are recoverable: they are reported back to
/// the offending player as a `MESSAGE` line and never alter shared state.
/// [`GameError::ChannelClosed`] ends only the affected connection's loop.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The acting player is not the current-turn holder.
    #[display("not your turn")]
    TurnViolation,

    /// The second player has not connected yet.
    #[display("you don't have an opponent yet")]
    NoOpponent,

    /// The target cell already holds a mark.
    #[display("cell {_0} is already occupied")]
    CellOccupied(#[error(not(source))] usize),

    /// The game already ended; the board cannot change any more.
    #[display("the game is already over")]
    GameOver,

    /// A move directive carried a malformed or out-of-range cell index.
    #[display("invalid move input: {_0}")]
    InvalidInput(#[error(not(source))] String),

    /// Both seats of the session are already taken.
    #[display("session already has two players")]
    SessionFull,

    /// The peer's outbound channel is gone (disconnected or write failed).
    #[display("connection channel closed")]
    ChannelClosed,
}
