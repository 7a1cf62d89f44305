//! Draw ("cats game") detection.

use crate::board::BoardState;
use tracing::instrument;

/// True if the board is full.
///
/// Only meaningful once every segment has been checked for a win; a full
/// board with a winning segment is a win, not a draw.
#[instrument(skip_all)]
pub fn is_cats(board: &BoardState) -> bool {
    board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SpaceValue;

    #[test]
    fn test_empty_board_not_cats() {
        assert!(!is_cats(&BoardState::new(3).unwrap()));
    }

    #[test]
    fn test_partial_board_not_cats() {
        let board = BoardState::new(2)
            .unwrap()
            .take_space(SpaceValue::MarkerA, 0, 0)
            .unwrap();
        assert!(!is_cats(&board));
    }

    #[test]
    fn test_full_board_is_cats() {
        let board = BoardState::from_values(
            2,
            [
                SpaceValue::MarkerA,
                SpaceValue::MarkerB,
                SpaceValue::MarkerB,
                SpaceValue::MarkerA,
            ],
        )
        .unwrap();
        assert!(is_cats(&board));
    }
}
