//! The per-connection protocol loop.
//!
//! Each accepted connection gets one [`Participant`] running on its own
//! task. The participant reads directives off the socket, calls into the
//! shared [`Session`], and fans resulting messages out to its own outbox
//! and, through the session's seat table, to the opponent's.

use crate::error::GameError;
use crate::game::Mark;
use crate::protocol::{Directive, Outbox, ServerMessage};
use crate::session::{Outcome, Session};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

/// The protocol-driving handler bound to one player's connection.
pub struct Participant {
    mark: Mark,
    session: Arc<Session>,
    outbox: Outbox,
}

impl Participant {
    /// Creates a participant for a player already seated in `session`.
    pub fn new(session: Arc<Session>, mark: Mark, outbox: Outbox) -> Self {
        Self {
            mark,
            session,
            outbox,
        }
    }

    /// The mark this participant plays.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Drives the connection until EOF, a `QUIT` directive, or a dead
    /// outbox. On every exit path the opponent gets a best-effort
    /// `OTHER_PLAYER_LEFT` notice, then the reader and outbox drop, which
    /// releases the underlying connection.
    #[instrument(skip(self, reader), fields(mark = %self.mark))]
    pub async fn run<R>(self, reader: R)
    where
        R: AsyncBufRead + Unpin,
    {
        if let Err(err) = self.attach() {
            warn!(error = %err, "connection lost before welcome");
        } else {
            self.process_directives(reader).await;
        }
        self.depart();
    }

    /// Sends the connect-time notices. The first player is told to wait;
    /// the second player's attach tells the first player to move.
    fn attach(&self) -> Result<(), GameError> {
        self.outbox.send(ServerMessage::Welcome(self.mark))?;
        match self.mark {
            Mark::X => {
                self.outbox.send(ServerMessage::Message(
                    "waiting for your opponent to connect".to_string(),
                ))?;
            }
            Mark::O => {
                if let Some(opponent) = self.session.opponent_outbox(self.mark) {
                    opponent.send_best_effort(ServerMessage::Message("your move".to_string()));
                }
            }
        }
        Ok(())
    }

    /// Reads lines until the channel closes or the player quits.
    async fn process_directives<R>(&self, mut reader: R)
    where
        R: AsyncBufRead + Unpin,
    {
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("connection closed by peer");
                    return;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "read failed, ending loop");
                    return;
                }
            }
            match Directive::parse(&line) {
                Ok(Some(Directive::Quit)) => {
                    info!("player quit");
                    return;
                }
                Ok(Some(Directive::Move(cell))) => {
                    if self.handle_move(cell).is_err() {
                        // Own outbox is gone, nobody is listening.
                        return;
                    }
                }
                Ok(None) => {
                    debug!(line = line.trim(), "ignoring unrecognized line");
                }
                Err(err) => {
                    debug!(error = %err, "malformed move directive");
                    if self.outbox.send(ServerMessage::Message(err.to_string())).is_err() {
                        return;
                    }
                }
            }
        }
    }

    /// Applies one move and relays the outcome to both channels. The
    /// returned error means this participant's own outbox is closed.
    fn handle_move(&self, cell: usize) -> Result<(), GameError> {
        match self.session.apply_move(cell, self.mark) {
            Ok(outcome) => {
                self.outbox.send(ServerMessage::ValidMove)?;
                let opponent = self.session.opponent_outbox(self.mark);
                if let Some(opponent) = &opponent {
                    opponent.send_best_effort(ServerMessage::OpponentMoved(cell));
                }
                match outcome {
                    Outcome::Accepted => {}
                    Outcome::Victory => {
                        self.outbox.send(ServerMessage::Victory)?;
                        if let Some(opponent) = &opponent {
                            opponent.send_best_effort(ServerMessage::Defeat);
                        }
                    }
                    Outcome::Tie => {
                        self.outbox.send(ServerMessage::Tie)?;
                        if let Some(opponent) = &opponent {
                            opponent.send_best_effort(ServerMessage::Tie);
                        }
                    }
                }
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, cell, "move rejected");
                self.outbox.send(ServerMessage::Message(err.to_string()))
            }
        }
    }

    /// Best-effort opponent notification, then unconditional release of
    /// this player's own channel seat.
    fn depart(&self) {
        if let Some(opponent) = self.session.opponent_outbox(self.mark) {
            opponent.send_best_effort(ServerMessage::OtherPlayerLeft);
        }
        self.session.release(self.mark);
        info!("participant finished");
    }
}
