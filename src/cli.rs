//! Command-line interface for the tic-tac-toe server.

use clap::Parser;

/// Line-protocol tic-tac-toe server. Pairs incoming connections two at a
/// time into game sessions.
#[derive(Parser, Debug)]
#[command(name = "tictactoe-server")]
#[command(about = "Pairs TCP clients into two-player tic-tac-toe sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, default_value = "58901")]
    pub port: u16,
}
