//! Line-protocol tic-tac-toe server.
//!
//! Pairs two TCP clients into a game session and relays moves between
//! them until the game ends or a player disconnects.
//!
//! # Architecture
//!
//! - **Game**: pure board data with win/full queries
//! - **Session**: the shared state and its single move-serialization lock
//! - **Participant**: one connection's protocol loop
//! - **Server**: the pairing coordinator and per-connection tasks
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_server::GameServer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = GameServer::bind("127.0.0.1", 58901).await?;
//! server.run().await
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod error;
mod game;
mod participant;
mod protocol;
mod server;
mod session;

pub use cli::Cli;
pub use error::GameError;
pub use game::{Board, Mark, Square};
pub use participant::Participant;
pub use protocol::{Directive, Outbox, ServerMessage};
pub use server::GameServer;
pub use session::{Outcome, Phase, Session};
