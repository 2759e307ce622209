//! Game board representation.
//!
//! This module contains:
//! - `BoardLayout`: where the start and destination cards are pre-placed
//! - `Board`: an immutable-by-default snapshot of the square card grid
//! - `BoardJson`: a compact list-of-placements form for JSON consumers
//!
//! The placement engine only ever reads a `Board`. Committing a card with
//! [`Board::place`] is the job of the game state manager.

use crate::card::{Card, MAX_DESTINATIONS};
use crate::grid::{Direction, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Start cell of the standard layout
pub const STANDARD_START: Position = Position::new(7, 4);

/// Destination cells of the standard layout
pub const STANDARD_DESTINATIONS: [Position; 3] = [
    Position::new(1, 2),
    Position::new(1, 4),
    Position::new(1, 6),
];

/// Errors that can occur when building or mutating a board
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Board has {0} cells, which is not a square grid")]
    NotSquare(usize),

    #[error("Board size must be between 1 and 255")]
    InvalidSize,

    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("Position {0} is already occupied")]
    Occupied(Position),

    #[error("Board already has a start card")]
    DuplicateStart,

    #[error("At most 3 destinations are supported, got {0}")]
    TooManyDestinations(usize),
}

/// Pre-placed card coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    /// Side length of the square board
    pub size: u8,
    /// Cell holding the start card
    pub start: Position,
    /// Cells holding destination 1, 2, 3 in order
    pub destinations: Vec<Position>,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            start: STANDARD_START,
            destinations: STANDARD_DESTINATIONS.to_vec(),
        }
    }
}

/// A square grid of optionally occupied cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardJson", into = "BoardJson")]
pub struct Board {
    size: u8,
    /// Row-major cells
    cells: Vec<Option<Card>>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Create the standard 9x9 board with start and destinations pre-placed
    pub fn standard() -> Self {
        let mut board = Self::new(BOARD_SIZE);
        board.cells[STANDARD_START.index(BOARD_SIZE)] = Some(Card::start());
        for (i, pos) in STANDARD_DESTINATIONS.iter().enumerate() {
            board.cells[pos.index(BOARD_SIZE)] = Card::destination(i as u8 + 1).ok();
        }
        board
    }

    /// Create a board from a custom layout
    pub fn with_layout(layout: &BoardLayout) -> Result<Self, BoardError> {
        if layout.size == 0 {
            return Err(BoardError::InvalidSize);
        }
        if layout.destinations.len() > MAX_DESTINATIONS as usize {
            return Err(BoardError::TooManyDestinations(layout.destinations.len()));
        }

        let mut board = Self::new(layout.size);
        board.place(layout.start, Card::start())?;
        for (i, pos) in layout.destinations.iter().enumerate() {
            if let Ok(card) = Card::destination(i as u8 + 1) {
                board.place(*pos, card)?;
            }
        }
        Ok(board)
    }

    /// Wrap a flat row-major cell list.
    ///
    /// The cell count must be a perfect square.
    pub fn from_cells(cells: Vec<Option<Card>>) -> Result<Self, BoardError> {
        let len = cells.len();
        let side = (len as f64).sqrt().round() as usize;
        if side * side != len {
            return Err(BoardError::NotSquare(len));
        }
        if side == 0 || side > u8::MAX as usize {
            return Err(BoardError::InvalidSize);
        }
        if cells.iter().flatten().filter(|card| card.is_start()).count() > 1 {
            return Err(BoardError::DuplicateStart);
        }
        Ok(Self {
            size: side as u8,
            cells,
        })
    }

    /// Side length
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the position lies on this board
    pub fn contains(&self, pos: Position) -> bool {
        pos.in_bounds(self.size)
    }

    /// Card at a position (None if empty or off the board)
    pub fn get(&self, pos: Position) -> Option<&Card> {
        if !self.contains(pos) {
            return None;
        }
        self.cells[pos.index(self.size)].as_ref()
    }

    /// Whether a card sits at this position
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Commit a card to an empty cell.
    ///
    /// Does not check placement rules; callers validate first.
    pub fn place(&mut self, pos: Position, card: Card) -> Result<(), BoardError> {
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        if self.is_occupied(pos) {
            return Err(BoardError::Occupied(pos));
        }
        if card.is_start() && self.start_position().is_some() {
            return Err(BoardError::DuplicateStart);
        }
        self.cells[pos.index(self.size)] = Some(card);
        Ok(())
    }

    /// Every cell on the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..self.cells.len()).map(move |i| Position::from_index(i, size))
    }

    /// All placed cards with their positions
    pub fn occupied(&self) -> impl Iterator<Item = (Position, &Card)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|card| (Position::from_index(i, size), card)))
    }

    /// Number of placed cards
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied orthogonal neighbors with the direction leading to each
    pub fn occupied_neighbors(
        &self,
        pos: Position,
    ) -> impl Iterator<Item = (Direction, Position, &Card)> {
        pos.neighbors(self.size)
            .filter_map(move |(dir, next)| self.get(next).map(|card| (dir, next, card)))
    }

    /// Where the start card sits, if placed
    pub fn start_position(&self) -> Option<Position> {
        self.occupied()
            .find(|(_, card)| card.is_start())
            .map(|(pos, _)| pos)
    }

    /// Where the destination cards sit
    pub fn destination_positions(&self) -> Vec<Position> {
        self.occupied()
            .filter(|(_, card)| card.is_destination())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Convert to the list-of-placements representation
    pub fn to_json_friendly(&self) -> BoardJson {
        BoardJson {
            size: self.size,
            cells: self
                .occupied()
                .map(|(position, card)| PlacedCard {
                    position,
                    card: card.clone(),
                })
                .collect(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// A card and where it sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub position: Position,
    pub card: Card,
}

/// JSON-friendly board: only occupied cells are listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardJson {
    pub size: u8,
    pub cells: Vec<PlacedCard>,
}

impl TryFrom<BoardJson> for Board {
    type Error = BoardError;

    fn try_from(json: BoardJson) -> Result<Self, Self::Error> {
        if json.size == 0 {
            return Err(BoardError::InvalidSize);
        }
        let mut board = Board::new(json.size);
        for placed in json.cells {
            board.place(placed.position, placed.card)?;
        }
        Ok(board)
    }
}

impl From<Board> for BoardJson {
    fn from(board: Board) -> Self {
        board.to_json_friendly()
    }
}
