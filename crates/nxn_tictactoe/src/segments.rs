//! Winning shapes, generated parametrically for any board size.
//!
//! The catalog order is columns, rows, the top-left diagonal, the
//! top-right diagonal, then diamonds and squares when enabled. Win
//! detection reports the first satisfied segment in this order, so the
//! order must not change.

use crate::board::Coordinate;
use crate::error::{GameError, GameErrorKind};
use crate::MINIMUM_BOARD_SIZE;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of spaces in a diamond or square shape.
pub const SHAPE_SIZE: usize = 4;

/// Which optional shapes count as wins, on top of lines and diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShapeFlags {
    /// Include 4-space diamond shapes.
    pub include_diamonds: bool,
    /// Include 2×2 square shapes.
    pub include_squares: bool,
}

impl ShapeFlags {
    /// Rows, columns, and diagonals only.
    pub const LINES_ONLY: Self = Self {
        include_diamonds: false,
        include_squares: false,
    };

    /// Every shape enabled.
    pub const ALL: Self = Self {
        include_diamonds: true,
        include_squares: true,
    };

    /// Creates flags from the two toggles.
    pub const fn new(include_diamonds: bool, include_squares: bool) -> Self {
        Self {
            include_diamonds,
            include_squares,
        }
    }

    /// Default shape set for a board: extra shapes switch on from 4×4 up.
    pub fn for_board_size(size: usize) -> Self {
        if size >= 4 { Self::ALL } else { Self::LINES_ONLY }
    }
}

/// Shape and position of a winning segment.
///
/// The `Display` form is the segment's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Every space in a column.
    #[display("Column{_0}")]
    Column(usize),
    /// Every space in a row.
    #[display("Row{_0}")]
    Row(usize),
    /// Top-left to bottom-right diagonal.
    #[display("DiagonalTop")]
    DiagonalTop,
    /// Top-right to bottom-left diagonal.
    #[display("DiagonalBottom")]
    DiagonalBottom,
    /// Diamond whose top point sits at (col, row).
    #[display("Diamond{col}{row}")]
    Diamond {
        /// Column of the top point.
        col: usize,
        /// Row of the top point.
        row: usize,
    },
    /// 2×2 square whose top-left corner sits at (col, row).
    #[display("Square{col}{row}")]
    Square {
        /// Column of the top-left corner.
        col: usize,
        /// Row of the top-left corner.
        row: usize,
    },
}

/// One winning shape: its label and the coordinates it covers.
///
/// Only the catalog builds segments, so the label always matches the kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    kind: SegmentKind,
    label: String,
    coordinates: Vec<Coordinate>,
}

impl Segment {
    fn new(kind: SegmentKind, coordinates: Vec<Coordinate>) -> Self {
        Self {
            label: kind.to_string(),
            kind,
            coordinates,
        }
    }

    /// Returns the shape and position.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Returns the stable label, e.g. `Row0` or `Square12`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the covered coordinates in generation order.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Returns true if this segment covers `(x, y)`.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.coordinates.iter().any(|c| c.x == x && c.y == y)
    }
}

/// Every winning segment for one board size and shape configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinPatternCatalog {
    board_size: usize,
    flags: ShapeFlags,
    segments: Vec<Segment>,
}

impl WinPatternCatalog {
    /// Generates the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidSize`] if `board_size` is below
    /// [`MINIMUM_BOARD_SIZE`].
    #[instrument]
    pub fn new(board_size: usize, flags: ShapeFlags) -> Result<Self, GameError> {
        if board_size < MINIMUM_BOARD_SIZE {
            return Err(GameError::new(
                GameErrorKind::InvalidSize,
                format!(
                    "catalog needs a board of at least {}, got {}",
                    MINIMUM_BOARD_SIZE, board_size
                ),
            ));
        }

        let mut segments = Vec::new();
        push_columns(&mut segments, board_size);
        push_rows(&mut segments, board_size);
        push_diagonals(&mut segments, board_size);
        if flags.include_diamonds {
            push_diamonds(&mut segments, board_size);
        }
        if flags.include_squares {
            push_squares(&mut segments, board_size);
        }

        debug!(segment_count = segments.len(), "Built winning segment catalog");

        Ok(Self {
            board_size,
            flags,
            segments,
        })
    }

    /// Returns the board size the catalog was built for.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Returns the shape configuration.
    pub fn flags(&self) -> ShapeFlags {
        self.flags
    }

    /// Returns every segment in catalog order.
    pub fn all_segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Looks up the first segment, in catalog order, with `label`.
    ///
    /// Diamond and square labels repeat on boards of 12 and larger
    /// (`Square{1,11}` and `Square{11,1}` are both `Square111`).
    pub fn segment(&self, label: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.label == label)
    }

    /// Labels of every segment covering `(x, y)`, in catalog order.
    ///
    /// Purely coordinate-based: no board is consulted.
    pub fn segment_labels_containing(&self, x: usize, y: usize) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|s| s.contains(x, y))
            .map(Segment::label)
            .collect()
    }
}

fn push_columns(segments: &mut Vec<Segment>, size: usize) {
    for col in 0..size {
        let coordinates = (0..size).map(|row| Coordinate::new(col, row)).collect();
        segments.push(Segment::new(SegmentKind::Column(col), coordinates));
    }
}

fn push_rows(segments: &mut Vec<Segment>, size: usize) {
    for row in 0..size {
        let coordinates = (0..size).map(|col| Coordinate::new(col, row)).collect();
        segments.push(Segment::new(SegmentKind::Row(row), coordinates));
    }
}

fn push_diagonals(segments: &mut Vec<Segment>, size: usize) {
    let top = (0..size).map(|i| Coordinate::new(i, i)).collect();
    segments.push(Segment::new(SegmentKind::DiagonalTop, top));

    let bottom = (0..size).map(|i| Coordinate::new(size - 1 - i, i)).collect();
    segments.push(Segment::new(SegmentKind::DiagonalBottom, bottom));
}

fn push_diamonds(segments: &mut Vec<Segment>, size: usize) {
    // Needs a column on each side and two rows below the top point.
    if size < 4 {
        return;
    }
    for col in 1..=size - 2 {
        for row in 0..=size - 3 {
            let coordinates = vec![
                Coordinate::new(col, row),
                Coordinate::new(col - 1, row + 1),
                Coordinate::new(col + 1, row + 1),
                Coordinate::new(col, row + 2),
            ];
            segments.push(Segment::new(SegmentKind::Diamond { col, row }, coordinates));
        }
    }
}

fn push_squares(segments: &mut Vec<Segment>, size: usize) {
    for col in 0..size - 1 {
        for row in 0..size - 1 {
            let coordinates = vec![
                Coordinate::new(col, row),
                Coordinate::new(col + 1, row),
                Coordinate::new(col, row + 1),
                Coordinate::new(col + 1, row + 1),
            ];
            segments.push(Segment::new(SegmentKind::Square { col, row }, coordinates));
        }
    }
}
