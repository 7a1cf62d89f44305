//! nxn_tictactoe - terminal front end
//!
//! Plays N×N tic-tac-toe on stdin/stdout.

mod cli;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.settings()?;
    let engine = settings.build_engine()?;

    match cli.command.unwrap_or_default() {
        Command::Play => {
            info!(board_size = settings.board_size(), "Starting interactive game");
            let mut engine = engine;
            let stdin = std::io::stdin();
            play::run(&mut engine, stdin.lock(), std::io::stdout().lock())
        }
        Command::Segments => play::list_segments(engine.catalog(), std::io::stdout().lock()),
    }
}
