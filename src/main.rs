//! Tic-tac-toe server binary.

use anyhow::Result;
use clap::Parser;
use tictactoe_server::{Cli, GameServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    info!(host = %cli.host, port = cli.port, "starting tic-tac-toe server");
    let server = GameServer::bind(&cli.host, cli.port).await?;
    server.run().await
}
