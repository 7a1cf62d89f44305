//! Win detection over a winning-segment catalog.

use crate::board::{BoardState, SpaceValue};
use crate::error::GameError;
use crate::segments::{Segment, WinPatternCatalog};
use tracing::instrument;

/// Returns the first segment, in catalog order, filled with one marker.
///
/// # Errors
///
/// Returns [`crate::GameErrorKind::OutOfRange`] if a segment reaches past
/// the board, which only happens when the catalog was built for a larger
/// board.
#[instrument(skip_all)]
pub fn winning_segment<'a>(
    catalog: &'a WinPatternCatalog,
    board: &BoardState,
) -> Result<Option<&'a Segment>, GameError> {
    for segment in catalog.all_segments() {
        if segment_won(board, segment)? {
            return Ok(Some(segment));
        }
    }
    Ok(None)
}

/// True if every space of `segment` holds the same marker.
fn segment_won(board: &BoardState, segment: &Segment) -> Result<bool, GameError> {
    let Some((first, rest)) = segment.coordinates().split_first() else {
        return Ok(false);
    };

    let value = board.get(first.x, first.y)?;
    if value == SpaceValue::Available {
        return Ok(false);
    }

    for c in rest {
        if board.get(c.x, c.y)? != value {
            return Ok(false);
        }
    }
    Ok(true)
}
