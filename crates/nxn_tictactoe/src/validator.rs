//! Diff-based validation of board transitions.
//!
//! A transition is plausible as one legal move when two properties hold:
//! neither marker is more than one space ahead of the other, and no space
//! that was already taken changed its value. The check is coarse. It does
//! not confirm that exactly one space changed or that the
//! new marker belongs to the player whose turn it was; `take_space` on the
//! board is the primary guard and this runs behind it.

use crate::board::{BoardState, SpaceValue};
use crate::error::{GameError, GameErrorKind};
use tracing::{debug, instrument};

/// A property a board transition must satisfy.
pub trait TransitionCheck {
    /// Checks the property for `original -> changed`.
    fn holds(original: &BoardState, changed: &BoardState) -> bool;

    /// Human-readable description of the property.
    fn description() -> &'static str;
}

/// Marker counts on the changed board differ by at most one.
pub struct MarkerBalance;

impl TransitionCheck for MarkerBalance {
    fn holds(_original: &BoardState, changed: &BoardState) -> bool {
        let a = changed.count(SpaceValue::MarkerA);
        let b = changed.count(SpaceValue::MarkerB);
        a.abs_diff(b) <= 1
    }

    fn description() -> &'static str {
        "No player is more than one move ahead"
    }
}

/// Spaces taken on the original board keep their value.
pub struct NoOverwrite;

impl TransitionCheck for NoOverwrite {
    fn holds(original: &BoardState, changed: &BoardState) -> bool {
        original
            .values()
            .zip(changed.values())
            .all(|(before, after)| before == SpaceValue::Available || before == after)
    }

    fn description() -> &'static str {
        "Taken spaces are never overwritten"
    }
}

/// Validates board transitions for one board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveValidator {
    board_size: usize,
}

impl MoveValidator {
    /// Creates a validator for boards of `board_size`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidSize`] if `board_size` is zero.
    #[instrument]
    pub fn new(board_size: usize) -> Result<Self, GameError> {
        if board_size < 1 {
            return Err(GameError::new(
                GameErrorKind::InvalidSize,
                "validator needs a board size of at least 1",
            ));
        }
        Ok(Self { board_size })
    }

    /// Returns the board size this validator checks.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Returns true if `original -> changed` is plausible as a single move.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::SizeMismatch`] if either board is not of the
    /// validator's size.
    #[instrument(skip_all, fields(size = self.board_size))]
    pub fn move_was_valid(
        &self,
        original: &BoardState,
        changed: &BoardState,
    ) -> Result<bool, GameError> {
        for board in [original, changed] {
            if board.size() != self.board_size {
                return Err(GameError::new(
                    GameErrorKind::SizeMismatch,
                    format!(
                        "validator size {} does not match board size {}",
                        self.board_size,
                        board.size()
                    ),
                ));
            }
        }

        if !MarkerBalance::holds(original, changed) {
            debug!(check = MarkerBalance::description(), "Transition rejected");
            return Ok(false);
        }
        if !NoOverwrite::holds(original, changed) {
            debug!(check = NoOverwrite::description(), "Transition rejected");
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SpaceValue::{Available as E, MarkerA as A, MarkerB as B};

    fn board(values: [SpaceValue; 9]) -> BoardState {
        BoardState::from_values(3, values).unwrap()
    }

    #[test]
    fn test_single_move_valid() {
        let validator = MoveValidator::new(3).unwrap();
        let original = BoardState::new(3).unwrap();
        let changed = original.take_space(A, 1, 1).unwrap();
        assert!(validator.move_was_valid(&original, &changed).unwrap());
    }

    #[test]
    fn test_two_ahead_invalid() {
        let validator = MoveValidator::new(3).unwrap();
        let original = BoardState::new(3).unwrap();
        let changed = board([A, A, E, E, E, E, E, E, E]);
        assert!(!validator.move_was_valid(&original, &changed).unwrap());
    }

    #[test]
    fn test_overwrite_invalid() {
        let validator = MoveValidator::new(3).unwrap();
        let original = board([A, E, E, E, E, E, E, E, E]);
        let changed = board([B, E, E, E, E, E, E, E, E]);
        assert!(!validator.move_was_valid(&original, &changed).unwrap());
    }

    #[test]
    fn test_clearing_taken_space_invalid() {
        let validator = MoveValidator::new(3).unwrap();
        let original = board([A, B, E, E, E, E, E, E, E]);
        let changed = board([A, E, E, E, E, E, E, E, E]);
        assert!(!validator.move_was_valid(&original, &changed).unwrap());
    }

    #[test]
    fn test_balanced_double_fill_passes() {
        // Two available spaces filled at once with opposing markers keep the
        // counts balanced and overwrite nothing, so the coarse check accepts it.
        let validator = MoveValidator::new(3).unwrap();
        let original = BoardState::new(3).unwrap();
        let changed = board([A, B, E, E, E, E, E, E, E]);
        assert!(validator.move_was_valid(&original, &changed).unwrap());
    }

    #[test]
    fn test_size_mismatch() {
        let validator = MoveValidator::new(3).unwrap();
        let small = BoardState::new(2).unwrap();
        let normal = BoardState::new(3).unwrap();
        let err = validator.move_was_valid(&small, &normal).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::SizeMismatch);
        let err = validator.move_was_valid(&normal, &small).unwrap_err();
        assert_eq!(err.kind(), GameErrorKind::SizeMismatch);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            MoveValidator::new(0).unwrap_err().kind(),
            GameErrorKind::InvalidSize
        );
    }
}
