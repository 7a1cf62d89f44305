//! User-configurable game settings, loadable from TOML.

use crate::board::SpaceValue;
use crate::engine::{GameEngine, Seat};
use crate::error::ConfigError;
use crate::player::Player;
use crate::segments::ShapeFlags;
use crate::{DEFAULT_BOARD_SIZE, MINIMUM_BOARD_SIZE};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for one game session.
///
/// Player 1 always plays `MarkerA` (X) and player 2 `MarkerB` (O). When a
/// shape toggle is left unset, diamonds and squares are enabled exactly for
/// boards of 4×4 and larger.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameSettings {
    /// Name of the first player.
    #[serde(default = "default_player1_name")]
    player1_name: String,

    /// Name of the second player.
    #[serde(default = "default_player2_name")]
    player2_name: String,

    /// Side length of the board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Who moves first.
    #[serde(default)]
    starting_player: Seat,

    /// Explicit diamond toggle.
    #[serde(default)]
    include_diamonds: Option<bool>,

    /// Explicit square toggle.
    #[serde(default)]
    include_squares: Option<bool>,
}

fn default_player1_name() -> String {
    "X".to_string()
}

fn default_player2_name() -> String {
    "O".to_string()
}

fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player1_name: default_player1_name(),
            player2_name: default_player2_name(),
            board_size: default_board_size(),
            starting_player: Seat::default(),
            include_diamonds: None,
            include_squares: None,
        }
    }
}

impl GameSettings {
    /// Creates settings for two named players on a board of `board_size`.
    #[instrument(skip(player1_name, player2_name))]
    pub fn new(
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        board_size: usize,
    ) -> Self {
        Self {
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            board_size,
            ..Self::default()
        }
    }

    /// Loads settings from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;
        let settings = Self::from_toml(&content)?;
        info!(board_size = settings.board_size, "Settings loaded");
        Ok(settings)
    }

    /// Parses settings from TOML text and validates them.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Sets the board size.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Sets who moves first.
    pub fn with_starting_player(mut self, seat: Seat) -> Self {
        self.starting_player = seat;
        self
    }

    /// Forces diamonds on or off.
    pub fn with_diamonds(mut self, include: bool) -> Self {
        self.include_diamonds = Some(include);
        self
    }

    /// Forces squares on or off.
    pub fn with_squares(mut self, include: bool) -> Self {
        self.include_squares = Some(include);
        self
    }

    /// Sets the first player's name.
    pub fn with_player1_name(mut self, name: impl Into<String>) -> Self {
        self.player1_name = name.into();
        self
    }

    /// Sets the second player's name.
    pub fn with_player2_name(mut self, name: impl Into<String>) -> Self {
        self.player2_name = name.into();
        self
    }

    /// Resolves the shape toggles against the board-size default.
    pub fn shapes(&self) -> ShapeFlags {
        let default = ShapeFlags::for_board_size(self.board_size);
        ShapeFlags::new(
            self.include_diamonds.unwrap_or(default.include_diamonds),
            self.include_squares.unwrap_or(default.include_squares),
        )
    }

    /// Checks names and board size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player1_name.is_empty() || self.player2_name.is_empty() {
            return Err(ConfigError::new("Player names must not be empty"));
        }
        if self.player1_name == self.player2_name {
            return Err(ConfigError::new(format!(
                "Player names must differ, both are {}",
                self.player1_name
            )));
        }
        if self.board_size < MINIMUM_BOARD_SIZE {
            return Err(ConfigError::new(format!(
                "Board size must be at least {}, got {}",
                MINIMUM_BOARD_SIZE, self.board_size
            )));
        }
        Ok(())
    }

    /// Creates both players and an engine from these settings.
    #[instrument(skip(self))]
    pub fn build_engine(&self) -> Result<GameEngine, ConfigError> {
        self.validate()?;
        let player1 = Player::new(&self.player1_name, SpaceValue::MarkerA)?;
        let player2 = Player::new(&self.player2_name, SpaceValue::MarkerB)?;
        let starting = match self.starting_player {
            Seat::Player1 => player1.clone(),
            Seat::Player2 => player2.clone(),
        };

        let engine = GameEngine::builder()
            .player1(player1)
            .player2(player2)
            .starting_player(starting)
            .board_size(self.board_size)
            .shapes(self.shapes())
            .build()?;
        Ok(engine)
    }
}
