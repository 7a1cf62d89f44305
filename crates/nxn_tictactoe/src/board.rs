//! Board storage for N×N tic-tac-toe.
//!
//! A [`BoardState`] is an immutable, row-major grid of [`SpaceValue`]s.
//! Cell `(x, y)` lives at index `x + y * size`. Taking a space never touches
//! the receiver: it returns a fresh board that owns its own cell buffer, so a
//! board can be handed to other threads or kept as history without locking.

use crate::error::{GameError, GameErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::instrument;

/// Value held by a single board space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum SpaceValue {
    /// Nobody has taken the space.
    #[default]
    Available,
    /// Taken by the first marker (rendered `X`).
    MarkerA,
    /// Taken by the second marker (rendered `O`).
    MarkerB,
}

impl SpaceValue {
    /// Returns true if this is a player marker rather than `Available`.
    pub fn is_marker(self) -> bool {
        !matches!(self, SpaceValue::Available)
    }

    /// Returns the other player's marker, or `None` for `Available`.
    pub fn opponent(self) -> Option<Self> {
        match self {
            SpaceValue::Available => None,
            SpaceValue::MarkerA => Some(SpaceValue::MarkerB),
            SpaceValue::MarkerB => Some(SpaceValue::MarkerA),
        }
    }

    /// Single-character symbol used when rendering a board.
    pub fn symbol(self) -> char {
        match self {
            SpaceValue::Available => '.',
            SpaceValue::MarkerA => 'X',
            SpaceValue::MarkerB => 'O',
        }
    }
}

/// A column/row pair on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column, counted from the left.
    pub x: usize,
    /// Row, counted from the top.
    pub y: usize,
}

impl Coordinate {
    /// Creates a coordinate without bounds checking.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Converts a row-major index back into a coordinate.
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: index / size,
        }
    }

    /// Row-major index of this coordinate on a board of `size`.
    pub fn to_index(self, size: usize) -> usize {
        self.x + self.y * size
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

/// Immutable N×N board.
///
/// Cloning is cheap: clones share the same cell buffer, which is never
/// written after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    size: usize,
    spaces: Arc<[SpaceValue]>,
}

impl BoardState {
    /// Creates an empty board with every space available.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidSize`] if `size` is zero.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size < 1 {
            return Err(GameError::new(
                GameErrorKind::InvalidSize,
                format!("board size must be at least 1, got {}", size),
            ));
        }
        Ok(Self {
            size,
            spaces: vec![SpaceValue::Available; size * size].into(),
        })
    }

    /// Builds a board from row-major values.
    ///
    /// Used to reconstruct boards that were not reached through single moves,
    /// for example snapshots or test fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidSize`] if `size` is zero or the number
    /// of values is not `size * size`.
    #[instrument(skip(values))]
    pub fn from_values(
        size: usize,
        values: impl IntoIterator<Item = SpaceValue>,
    ) -> Result<Self, GameError> {
        let spaces: Vec<SpaceValue> = values.into_iter().collect();
        if size < 1 || spaces.len() != size * size {
            return Err(GameError::new(
                GameErrorKind::InvalidSize,
                format!(
                    "expected {} values for size {}, got {}",
                    size * size,
                    size,
                    spaces.len()
                ),
            ));
        }
        Ok(Self {
            size,
            spaces: spaces.into(),
        })
    }

    /// Returns the board's side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::OutOfRange`] if either coordinate is off the board.
    pub fn get(&self, x: usize, y: usize) -> Result<SpaceValue, GameError> {
        let index = self.offset(x, y)?;
        Ok(self.spaces[index])
    }

    /// Returns true if `(x, y)` is available.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::OutOfRange`] if either coordinate is off the board.
    pub fn is_available(&self, x: usize, y: usize) -> Result<bool, GameError> {
        Ok(self.get(x, y)? == SpaceValue::Available)
    }

    /// Returns true if no space is available.
    pub fn is_full(&self) -> bool {
        !self.spaces.contains(&SpaceValue::Available)
    }

    /// Returns true if every space is available.
    pub fn is_empty(&self) -> bool {
        self.spaces.iter().all(|s| *s == SpaceValue::Available)
    }

    /// Takes the space at `(x, y)` with `value`, returning the resulting board.
    ///
    /// The receiver is left untouched.
    ///
    /// # Errors
    ///
    /// - [`GameErrorKind::OutOfRange`] if either coordinate is off the board.
    /// - [`GameErrorKind::SpaceNotAvailable`] if the space is already taken.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn take_space(&self, value: SpaceValue, x: usize, y: usize) -> Result<Self, GameError> {
        let index = self.offset(x, y)?;
        if self.spaces[index] != SpaceValue::Available {
            return Err(GameError::new(
                GameErrorKind::SpaceNotAvailable,
                format!("space ({}, {}) holds {:?}", x, y, self.spaces[index]),
            ));
        }

        let mut spaces = self.spaces.to_vec();
        spaces[index] = value;
        Ok(Self {
            size: self.size,
            spaces: spaces.into(),
        })
    }

    /// Iterates every space value in row-major order.
    ///
    /// Each call starts a fresh pass over the board.
    pub fn values(&self) -> impl Iterator<Item = SpaceValue> + '_ {
        self.spaces.iter().copied()
    }

    /// Iterates every space together with its coordinate.
    pub fn spaces(&self) -> impl Iterator<Item = (Coordinate, SpaceValue)> + '_ {
        let size = self.size;
        self.values()
            .enumerate()
            .map(move |(i, v)| (Coordinate::from_index(i, size), v))
    }

    /// Counts spaces holding `value`.
    pub fn count(&self, value: SpaceValue) -> usize {
        self.spaces.iter().filter(|s| **s == value).count()
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize, GameError> {
        if x >= self.size || y >= self.size {
            return Err(GameError::new(
                GameErrorKind::OutOfRange,
                format!("({}, {}) is outside a {}x{} board", x, y, self.size, self.size),
            ));
        }
        Ok(x + y * self.size)
    }
}

impl<'a> IntoIterator for &'a BoardState {
    type Item = SpaceValue;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, SpaceValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spaces.iter().copied()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.spaces.chunks(self.size).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().map(|s| s.symbol()).collect();
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
