//! Game rules for N×N tic-tac-toe.
//!
//! Classification is a pure function of a board and a winning-segment
//! catalog. Rules are kept apart from board storage and turn sequencing
//! so they can be run against any board, including ones that were not
//! reached through single moves.

pub mod draw;
pub mod win;

pub use draw::is_cats;
pub use win::winning_segment;

use crate::board::BoardState;
use crate::error::{GameError, GameErrorKind};
use crate::segments::{Segment, ShapeFlags, WinPatternCatalog};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Classification of a board.
///
/// The `Display` form is the tag presentation layers match on: `New`,
/// `InPlay`, `Cats`, or `Won` followed by the segment label (`WonRow0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum GameState {
    /// Fresh board, no move made yet.
    #[display("New")]
    New,
    /// Moves remain and nobody has won.
    #[display("InPlay")]
    InPlay,
    /// Full board without a winning segment.
    #[display("Cats")]
    Cats,
    /// The labelled segment is filled with one marker.
    #[display("Won{_0}")]
    Won(String),
}

impl GameState {
    /// Returns the winning segment label, if any.
    pub fn winning_label(&self) -> Option<&str> {
        match self {
            GameState::Won(label) => Some(label),
            _ => None,
        }
    }

    /// True once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Won(_) | GameState::Cats)
    }
}

/// Classifies boards of one size against one shape configuration.
#[derive(Debug, Clone)]
pub struct GameStateChecker {
    catalog: WinPatternCatalog,
}

impl GameStateChecker {
    /// Builds a checker and its catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidSize`] if `board_size` is below the minimum.
    #[instrument]
    pub fn new(board_size: usize, flags: ShapeFlags) -> Result<Self, GameError> {
        Ok(Self::from_catalog(WinPatternCatalog::new(board_size, flags)?))
    }

    /// Wraps an existing catalog.
    pub fn from_catalog(catalog: WinPatternCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog used for win detection.
    pub fn catalog(&self) -> &WinPatternCatalog {
        &self.catalog
    }

    /// Classifies `board` as `Won`, `Cats`, or `InPlay`.
    ///
    /// The first satisfied segment in catalog order wins.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::SizeMismatch`] if the board is not the
    /// checker's size.
    pub fn check(&self, board: &BoardState) -> Result<GameState, GameError> {
        self.classify(board).map(|(state, _)| state)
    }

    /// Like [`GameStateChecker::check`], also returning the winning segment.
    ///
    /// Labels of diamonds and squares repeat on boards of 12 and larger, so
    /// callers that need the winning spaces use the segment, not the label.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::SizeMismatch`] if the board is not the
    /// checker's size.
    #[instrument(skip_all, fields(size = board.size()))]
    pub fn classify(
        &self,
        board: &BoardState,
    ) -> Result<(GameState, Option<&Segment>), GameError> {
        if board.size() != self.catalog.board_size() {
            return Err(GameError::new(
                GameErrorKind::SizeMismatch,
                format!(
                    "checker size {} does not match board size {}",
                    self.catalog.board_size(),
                    board.size()
                ),
            ));
        }

        let winner = winning_segment(&self.catalog, board)?;
        let state = match winner {
            Some(segment) => GameState::Won(segment.label().to_string()),
            None if is_cats(board) => GameState::Cats,
            None => GameState::InPlay,
        };

        debug!(%state, "Classified board");
        Ok((state, winner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SpaceValue::{self, Available as E, MarkerA as A, MarkerB as B};
    use crate::segments::SegmentKind;

    fn board(size: usize, values: &[SpaceValue]) -> BoardState {
        BoardState::from_values(size, values.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_board_in_play() {
        let checker = GameStateChecker::new(3, ShapeFlags::LINES_ONLY).unwrap();
        let state = checker.check(&BoardState::new(3).unwrap()).unwrap();
        assert_eq!(state, GameState::InPlay);
    }

    #[test]
    fn test_cats_game() {
        let checker = GameStateChecker::new(3, ShapeFlags::LINES_ONLY).unwrap();
        let full = board(3, &[A, B, A, A, B, B, B, A, A]);
        assert_eq!(checker.check(&full).unwrap(), GameState::Cats);
    }

    #[test]
    fn test_row_win() {
        let checker = GameStateChecker::new(3, ShapeFlags::LINES_ONLY).unwrap();
        let won = board(3, &[A, A, A, B, B, E, E, E, E]);
        let state = checker.check(&won).unwrap();
        assert_eq!(state, GameState::Won("Row0".to_string()));
        assert_eq!(state.to_string(), "WonRow0");
    }

    #[test]
    fn test_first_match_in_catalog_order() {
        // Column0 and Row0 are both filled; columns come first.
        let checker = GameStateChecker::new(3, ShapeFlags::LINES_ONLY).unwrap();
        let both = board(3, &[A, A, A, A, B, B, A, B, B]);
        assert_eq!(
            checker.check(&both).unwrap(),
            GameState::Won("Column0".to_string())
        );
    }

    #[test]
    fn test_square_win_only_when_enabled() {
        let square = board(4, &[
            B, B, E, E,
            B, B, E, E,
            A, A, A, E,
            E, E, E, E,
        ]);
        let lines = GameStateChecker::new(4, ShapeFlags::LINES_ONLY).unwrap();
        let squares = GameStateChecker::new(4, ShapeFlags::new(false, true)).unwrap();
        assert_eq!(lines.check(&square).unwrap(), GameState::InPlay);
        assert_eq!(
            squares.check(&square).unwrap(),
            GameState::Won("Square00".to_string())
        );
    }

    #[test]
    fn test_diamond_win() {
        let diamond = board(4, &[
            E, E, E, E,
            E, E, A, E,
            E, A, B, A,
            E, B, A, B,
        ]);
        let checker = GameStateChecker::new(4, ShapeFlags::ALL).unwrap();
        let state = checker.check(&diamond).unwrap();
        assert_eq!(state, GameState::Won("Diamond21".to_string()));
        assert_eq!(state.to_string(), "WonDiamond21");
    }

    #[test]
    fn test_from_catalog_classifies_with_segment() {
        let catalog = WinPatternCatalog::new(3, ShapeFlags::LINES_ONLY).unwrap();
        let checker = GameStateChecker::from_catalog(catalog);
        let won = board(3, &[B, A, E, B, A, E, E, A, E]);
        let (state, segment) = checker.classify(&won).unwrap();
        assert_eq!(state, GameState::Won("Column1".to_string()));
        assert_eq!(segment.unwrap().kind(), SegmentKind::Column(1));

        let (state, segment) = checker.classify(&BoardState::new(3).unwrap()).unwrap();
        assert_eq!(state, GameState::InPlay);
        assert!(segment.is_none());
    }

    #[test]
    fn test_size_mismatch() {
        let checker = GameStateChecker::new(3, ShapeFlags::LINES_ONLY).unwrap();
        let err = checker.check(&BoardState::new(7).unwrap()).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::SizeMismatch);
    }

    #[test]
    fn test_state_tags() {
        assert_eq!(GameState::New.to_string(), "New");
        assert_eq!(GameState::InPlay.to_string(), "InPlay");
        assert_eq!(GameState::Cats.to_string(), "Cats");
        assert!(GameState::Cats.is_terminal());
        assert!(!GameState::New.is_terminal());
        assert_eq!(GameState::Won("Row1".into()).winning_label(), Some("Row1"));
    }
}
