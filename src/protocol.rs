//! Wire protocol: client directives, server messages, and the outbound
//! channel handle.
//!
//! Messages are newline-delimited UTF-8 text. Each connection gets an
//! [`Outbox`] whose receiving end is drained to the socket by a dedicated
//! writer task, so both players' loops can write to either connection
//! without sharing the socket itself.

use crate::error::GameError;
use crate::game::Mark;
use tokio::sync::mpsc;
use tracing::debug;

/// A parsed client-to-server line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Place a mark at the given cell (0-8).
    Move(usize),
    /// End this player's loop.
    Quit,
}

impl Directive {
    /// Parses one inbound line.
    ///
    /// Returns `Ok(None)` for lines carrying no recognized directive (they
    /// are silently ignored), and `Err(InvalidInput)` for a `MOVE` whose
    /// payload is not an integer. Range checking of the cell index is the
    /// session's job.
    pub fn parse(line: &str) -> Result<Option<Self>, GameError> {
        let line = line.trim();
        if line.starts_with("QUIT") {
            return Ok(Some(Directive::Quit));
        }
        if let Some(payload) = line.strip_prefix("MOVE") {
            let cell = payload
                .trim()
                .parse::<usize>()
                .map_err(|_| GameError::InvalidInput(payload.trim().to_string()))?;
            return Ok(Some(Directive::Move(cell)));
        }
        Ok(None)
    }
}

/// A server-to-client line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ServerMessage {
    /// Mark assignment, sent once at connect.
    #[display("WELCOME {_0}")]
    Welcome(Mark),
    /// Informational or error text (waiting notice, illegal-move reasons).
    #[display("MESSAGE {_0}")]
    Message(String),
    /// The sender's own move was accepted.
    #[display("VALID_MOVE")]
    ValidMove,
    /// The opponent just placed at the given cell.
    #[display("OPPONENT_MOVED {_0}")]
    OpponentMoved(usize),
    /// Terminal outcome: this player won.
    #[display("VICTORY")]
    Victory,
    /// Terminal outcome: this player lost.
    #[display("DEFEAT")]
    Defeat,
    /// Terminal outcome: the board filled with no winner.
    #[display("TIE")]
    Tie,
    /// The opponent disconnected.
    #[display("OTHER_PLAYER_LEFT")]
    OtherPlayerLeft,
}

/// Clonable handle for writing messages to one connection.
///
/// Backed by an unbounded mpsc channel; the receiving end belongs to the
/// connection's writer task. Once that task exits (client gone), every
/// send fails with [`GameError::ChannelClosed`].
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl Outbox {
    /// Creates an outbox and the receiver its writer task will drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues a message for delivery.
    pub fn send(&self, msg: ServerMessage) -> Result<(), GameError> {
        self.tx.send(msg).map_err(|_| GameError::ChannelClosed)
    }

    /// Queues a message, swallowing delivery failure. Used for notices to
    /// a possibly-disconnected opponent.
    pub fn send_best_effort(&self, msg: ServerMessage) {
        if let Err(err) = self.send(msg) {
            debug!(error = %err, "dropping message to closed channel");
        }
    }
}
