//! Command-line interface for nxn_tictactoe.

use clap::{Parser, Subcommand};
use nxn_tictactoe::{GameSettings, Seat};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// N×N tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "nxn_tictactoe")]
#[command(about = "Play N×N tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Board side length
    #[arg(short, long, global = true)]
    pub size: Option<usize>,

    /// Name of the first player (plays X)
    #[arg(long, global = true)]
    pub player1: Option<String>,

    /// Name of the second player (plays O)
    #[arg(long, global = true)]
    pub player2: Option<String>,

    /// Count diamonds as wins (default: on for 4x4 and larger)
    #[arg(long, global = true)]
    pub diamonds: Option<bool>,

    /// Count 2x2 squares as wins (default: on for 4x4 and larger)
    #[arg(long, global = true)]
    pub squares: Option<bool>,

    /// Let the second player move first
    #[arg(long, global = true)]
    pub second_starts: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Play an interactive game on stdin/stdout
    #[default]
    Play,

    /// List every winning segment for the configured board
    Segments,
}

impl Cli {
    /// Resolves settings: file (or defaults) first, then flag overrides.
    #[instrument(skip(self))]
    pub fn settings(&self) -> anyhow::Result<GameSettings> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::from_file(path)?,
            None => GameSettings::default(),
        };

        if let Some(size) = self.size {
            settings = settings.with_board_size(size);
        }
        if let Some(name) = &self.player1 {
            settings = settings.with_player1_name(name);
        }
        if let Some(name) = &self.player2 {
            settings = settings.with_player2_name(name);
        }
        if let Some(include) = self.diamonds {
            settings = settings.with_diamonds(include);
        }
        if let Some(include) = self.squares {
            settings = settings.with_squares(include);
        }
        if self.second_starts {
            settings = settings.with_starting_player(Seat::Player2);
        }

        settings.validate()?;
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["nxn_tictactoe"]);
        assert_eq!(cli.command.unwrap_or_default(), Command::Play);
        let settings = cli.settings().unwrap();
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::parse_from([
            "nxn_tictactoe",
            "--size",
            "5",
            "--player1",
            "Ada",
            "--squares",
            "false",
            "--second-starts",
            "segments",
        ]);
        assert_eq!(cli.command, Some(Command::Segments));
        let settings = cli.settings().unwrap();
        assert_eq!(*settings.board_size(), 5);
        assert_eq!(settings.player1_name(), "Ada");
        assert_eq!(*settings.starting_player(), Seat::Player2);
        assert!(settings.shapes().include_diamonds);
        assert!(!settings.shapes().include_squares);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let cli = Cli::parse_from(["nxn_tictactoe", "--player2", "X"]);
        assert!(cli.settings().is_err());
    }
}
