//! Pairing coordinator: accepts connections two at a time and wires each
//! pair into a fresh [`Session`].
//!
//! Per connection the server spawns two tasks: a writer draining the
//! player's [`Outbox`] to the socket, and a reader running the
//! [`Participant`] loop. Sessions are independent; nothing that happens
//! inside one can stop the accept loop.

use crate::participant::Participant;
use crate::protocol::{Outbox, ServerMessage};
use crate::session::Session;
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};

/// The listening server. Produces an unbounded sequence of sessions.
pub struct GameServer {
    listener: TcpListener,
}

impl GameServer {
    /// Binds the listener.
    #[instrument]
    pub async fn bind(host: &str, port: u16) -> Result<Self> {
        let listener = TcpListener::bind((host, port)).await?;
        info!(addr = %listener.local_addr()?, "tic-tac-toe server listening");
        Ok(Self { listener })
    }

    /// The bound address, useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever, pairing them in arrival order: the
    /// first of each pair plays X, the second plays O.
    pub async fn run(self) -> Result<()> {
        loop {
            let session = Arc::new(Session::new());
            self.accept_player(&session).await;
            self.accept_player(&session).await;
        }
    }

    /// Accepts one connection and attaches it to `session`. Accept and
    /// setup failures are logged and skipped; the next arrival takes the
    /// vacant seat.
    async fn accept_player(&self, session: &Arc<Session>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    info!(%peer, "player connected");
                    match attach_connection(stream, Arc::clone(session)) {
                        Ok(()) => return,
                        Err(err) => warn!(%peer, error = %err, "failed to seat player"),
                    }
                }
                Err(err) => warn!(error = %err, "accept failed"),
            }
        }
    }
}

/// Splits the stream, seats the player, and spawns its writer and reader
/// tasks.
fn attach_connection(stream: TcpStream, session: Arc<Session>) -> Result<()> {
    let (read_half, write_half) = stream.into_split();
    let (outbox, rx) = Outbox::channel();
    let mark = session.bind(outbox.clone())?;

    tokio::spawn(drain_outbox(rx, BufWriter::new(write_half)));

    let participant = Participant::new(session, mark, outbox);
    tokio::spawn(async move {
        participant.run(BufReader::new(read_half)).await;
    });
    Ok(())
}

/// Writer task: forwards queued messages to the socket as newline-delimited
/// lines until the outbox closes or a write fails.
async fn drain_outbox<W>(mut rx: UnboundedReceiver<ServerMessage>, mut writer: W)
where
    W: AsyncWriteExt + Unpin,
{
    while let Some(msg) = rx.recv().await {
        let line = format!("{msg}\n");
        if let Err(err) = writer.write_all(line.as_bytes()).await {
            debug!(error = %err, "write failed, closing writer");
            return;
        }
        if let Err(err) = writer.flush().await {
            debug!(error = %err, "flush failed, closing writer");
            return;
        }
    }
}
