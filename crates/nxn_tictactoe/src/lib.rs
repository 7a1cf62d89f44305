//! N×N tic-tac-toe engine.
//!
//! Tracks an immutable board, validates moves, detects wins over a
//! parametric family of winning shapes, and sequences turns between two
//! players.
//!
//! # Architecture
//!
//! - **Board**: immutable row-major grid ([`BoardState`])
//! - **Segments**: every winning shape for a board size ([`WinPatternCatalog`])
//! - **Validator**: diff-based transition check ([`MoveValidator`])
//! - **Rules**: board classification ([`GameStateChecker`])
//! - **Engine**: turn order, wins, notifications ([`GameEngine`])
//!
//! # Example
//!
//! ```
//! use nxn_tictactoe::{GameEngine, GameState, Player, SpaceValue};
//!
//! # fn main() -> Result<(), nxn_tictactoe::GameError> {
//! let x = Player::new("X", SpaceValue::MarkerA)?;
//! let o = Player::new("O", SpaceValue::MarkerB)?;
//! let mut engine = GameEngine::new(x, o, 3)?;
//!
//! for (col, row) in [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)] {
//!     engine.make_move(col, row)?;
//! }
//! assert_eq!(engine.current_game_state(), &GameState::Won("Row0".to_string()));
//! assert_eq!(engine.current_player().total_wins(), 1);
//! # Ok(())
//! # }
//! ```

mod board;
mod engine;
mod error;
mod events;
mod player;
pub mod rules;
mod segments;
mod settings;
mod validator;

/// Smallest board an engine or catalog accepts.
pub const MINIMUM_BOARD_SIZE: usize = 2;

/// Board size used when none is given.
pub const DEFAULT_BOARD_SIZE: usize = 3;

// Crate-level exports - Board
pub use board::{BoardState, Coordinate, SpaceValue};

// Crate-level exports - Winning segments
pub use segments::{SHAPE_SIZE, Segment, SegmentKind, ShapeFlags, WinPatternCatalog};

// Crate-level exports - Validation
pub use validator::{MarkerBalance, MoveValidator, NoOverwrite, TransitionCheck};

// Crate-level exports - Rules
pub use rules::{GameState, GameStateChecker};

// Crate-level exports - Players and engine
pub use engine::{GameEngine, GameEngineBuilder, GameSnapshot, Seat};
pub use player::Player;

// Crate-level exports - Notifications
pub use events::{GameStateChanged, GameStateListener, ListenerId};

// Crate-level exports - Errors and configuration
pub use error::{ConfigError, GameError, GameErrorKind};
pub use settings::GameSettings;
