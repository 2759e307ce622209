//! Square grid coordinate system.
//!
//! This module provides the foundational coordinate types for the tunnel board:
//! - `Direction`: The four cell edges, also used as the offset between neighbors
//! - `Position`: A (row, col) cell on a square board
//!
//! Rows grow downwards, so `Direction::Top` from row 7 leads to row 6.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the standard board
pub const BOARD_SIZE: u8 = 9;

/// Direction value outside of 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid direction {0}, expected 0-3")]
pub struct InvalidDirection(pub u8);

/// One of the four edges of a cell.
///
/// Serialized as its integer value (TOP=0, RIGHT=1, BOTTOM=2, LEFT=3) so that
/// card paths read the same as `[[0, 1, 2, 3]]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Direction {
    /// All directions in clockwise order starting from Top
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Integer value of this direction (0-3)
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The direction pointing the other way, `(d + 2) mod 4`
    pub const fn opposite(self) -> Direction {
        Self::ALL[((self as u8 + 2) % 4) as usize]
    }

    /// Row/column offset of a single step in this direction
    pub const fn offset(self) -> (i16, i16) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Bit used for this direction inside a path segment mask
    pub(crate) const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Top),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Bottom),
            3 => Ok(Direction::Left),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.index()
    }
}

/// A cell on the board, zero-based.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Create a new position
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether this position lies on a board with the given side length
    pub const fn in_bounds(&self, size: u8) -> bool {
        self.row < size && self.col < size
    }

    /// Row-major index into a board of the given side length
    pub fn index(&self, size: u8) -> usize {
        self.row as usize * size as usize + self.col as usize
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize, size: u8) -> Self {
        let size = size as usize;
        Self::new((index / size) as u8, (index % size) as u8)
    }

    /// The neighboring cell one step away, if it is still on the board
    pub fn step(&self, direction: Direction, size: u8) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = self.row as i16 + dr;
        let col = self.col as i16 + dc;
        if row < 0 || col < 0 || row >= size as i16 || col >= size as i16 {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }

    /// In-bounds orthogonal neighbors with the direction leading to each.
    ///
    /// Yields 2 cells in a corner, 3 along an edge and 4 elsewhere.
    pub fn neighbors(&self, size: u8) -> impl Iterator<Item = (Direction, Position)> {
        let origin = *self;
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| origin.step(dir, size).map(|pos| (dir, pos)))
    }

    /// Manhattan distance to another cell
    pub fn distance_to(&self, other: &Position) -> u32 {
        self.row.abs_diff(other.row) as u32 + self.col.abs_diff(other.col) as u32
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_direction() {
        assert_eq!(Direction::Top.opposite(), Direction::Bottom);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Bottom.opposite(), Direction::Top);
        assert_eq!(Direction::Left.opposite(), Direction::Right);

        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_direction_from_integer() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(Direction::try_from(i as u8), Ok(*dir));
        }
        assert_eq!(Direction::try_from(4), Err(InvalidDirection(4)));
        assert_eq!(Direction::try_from(255), Err(InvalidDirection(255)));
    }

    #[test]
    fn test_direction_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "3");
        let dir: Direction = serde_json::from_str("1").unwrap();
        assert_eq!(dir, Direction::Right);
        assert!(serde_json::from_str::<Direction>("7").is_err());
    }

    #[test]
    fn test_neighbor_counts() {
        let corner = Position::new(0, 0);
        let edge = Position::new(0, 4);
        let inner = Position::new(4, 4);

        assert_eq!(corner.neighbors(BOARD_SIZE).count(), 2);
        assert_eq!(edge.neighbors(BOARD_SIZE).count(), 3);
        assert_eq!(inner.neighbors(BOARD_SIZE).count(), 4);
        assert_eq!(Position::new(8, 8).neighbors(BOARD_SIZE).count(), 2);
    }

    #[test]
    fn test_step_follows_direction() {
        let start = Position::new(7, 4);
        assert_eq!(start.step(Direction::Top, BOARD_SIZE), Some(Position::new(6, 4)));
        assert_eq!(start.step(Direction::Right, BOARD_SIZE), Some(Position::new(7, 5)));
        assert_eq!(start.step(Direction::Bottom, BOARD_SIZE), Some(Position::new(8, 4)));
        assert_eq!(start.step(Direction::Left, BOARD_SIZE), Some(Position::new(7, 3)));
        assert_eq!(Position::new(8, 4).step(Direction::Bottom, BOARD_SIZE), None);
    }

    #[test]
    fn test_index_roundtrip() {
        let pos = Position::new(7, 4);
        assert_eq!(pos.index(BOARD_SIZE), 67);
        assert_eq!(Position::from_index(67, BOARD_SIZE), pos);
    }

    #[test]
    fn test_distance() {
        let a = Position::new(7, 4);
        let b = Position::new(1, 2);
        assert_eq!(a.distance_to(&b), 8);
        assert_eq!(b.distance_to(&a), 8);
        assert_eq!(a.distance_to(&a), 0);
    }
}
