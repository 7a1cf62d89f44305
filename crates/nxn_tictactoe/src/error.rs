//! Error types for board, catalog, and engine operations.

use derive_more::{Display, Error};
use tracing::instrument;

/// The kind of failure a game operation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GameErrorKind {
    /// Board size below the allowed minimum.
    #[display("invalid board size")]
    InvalidSize,
    /// Coordinate outside the board bounds.
    #[display("coordinate out of range")]
    OutOfRange,
    /// A required player or board was not supplied.
    #[display("required argument missing")]
    NullArgument,
    /// Both players were given the same marker.
    #[display("players share a marker")]
    DuplicateMarker,
    /// Both players were given the same name.
    #[display("players share a name")]
    DuplicateName,
    /// The starting player is neither of the configured players.
    #[display("starting player is not one of the two players")]
    InvalidStartingPlayer,
    /// A player was constructed with the available marker.
    #[display("available is not a player marker")]
    MarkerReservedValue,
    /// The target space is already taken.
    #[display("space not available")]
    SpaceNotAvailable,
    /// The move was rejected by the engine.
    #[display("invalid move")]
    InvalidMove,
    /// A board was checked against a component built for another size.
    #[display("board size mismatch")]
    SizeMismatch,
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} ({}) at {}:{}", kind, message, file, line)]
pub struct GameError {
    /// What went wrong.
    pub kind: GameErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: GameErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> GameErrorKind {
        self.kind
    }

    /// Returns true if this error is of the given kind.
    pub fn is(&self, kind: GameErrorKind) -> bool {
        self.kind == kind
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<GameError> for ConfigError {
    #[track_caller]
    fn from(err: GameError) -> Self {
        Self::new(format!("Invalid settings: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reports_kind_and_location() {
        let err = GameError::new(GameErrorKind::OutOfRange, "x = 7");
        assert_eq!(err.kind(), GameErrorKind::OutOfRange);
        assert!(err.is(GameErrorKind::OutOfRange));
        assert!(err.file.ends_with("error.rs"));
        let text = err.to_string();
        assert!(text.contains("coordinate out of range"));
        assert!(text.contains("x = 7"));
    }

    #[test]
    fn test_config_error_from_game_error() {
        let err: ConfigError = GameError::new(GameErrorKind::DuplicateName, "X").into();
        assert!(err.message.contains("players share a name"));
    }
}
