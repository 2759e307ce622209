//! Card types: tunnel segments, card kinds, and validated construction.
//!
//! This module contains:
//! - `PathSegment`: one continuous tunnel strand through a cell
//! - `ActionKind`: the action cards of the deck (effects are not modelled)
//! - `CardKind` / `Card`: the tagged card representation used by the board
//!
//! Cards are validated once, when they are built or deserialized. The placement
//! engine relies on that and never re-parses a card.

use crate::grid::{Direction, InvalidDirection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id of the single start card
pub const START_CARD_ID: &str = "start";

/// Prefix for destination card ids (`dest_1`, `dest_2`, ...)
pub const DESTINATION_PREFIX: &str = "dest_";

/// Highest destination index a board supports
pub const MAX_DESTINATIONS: u8 = 3;

/// Errors raised while building a card
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CardError {
    #[error("Card id must not be empty")]
    EmptyId,

    #[error("Path segment must touch at least one edge")]
    EmptySegment,

    #[error("Path segment lists direction {0:?} twice")]
    DuplicateDirection(Direction),

    #[error("Invalid direction {0}, expected 0-3")]
    InvalidDirection(u8),

    #[error("Destination index {0} out of range 1-3")]
    InvalidDestination(u8),
}

impl From<InvalidDirection> for CardError {
    fn from(err: InvalidDirection) -> Self {
        CardError::InvalidDirection(err.0)
    }
}

/// One continuous tunnel strand inside a cell.
///
/// Stored as a bitmask over [`Direction`]s, so a segment is a set and the
/// directions can never repeat. A single-direction segment is a dead end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct PathSegment(u8);

impl PathSegment {
    /// A segment joining all four edges
    pub const FULL: PathSegment = PathSegment(0b1111);

    /// Build a segment from the edges it touches
    pub fn new(directions: &[Direction]) -> Result<Self, CardError> {
        if directions.is_empty() {
            return Err(CardError::EmptySegment);
        }

        let mut mask = 0u8;
        for dir in directions {
            if mask & dir.bit() != 0 {
                return Err(CardError::DuplicateDirection(*dir));
            }
            mask |= dir.bit();
        }
        Ok(Self(mask))
    }

    /// Build a segment from raw direction values (0-3)
    pub fn from_raw(values: &[u8]) -> Result<Self, CardError> {
        let directions = values
            .iter()
            .map(|v| Direction::try_from(*v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&directions)
    }

    /// Whether this strand reaches the given edge
    pub fn touches(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Edges touched by this strand, clockwise from Top
    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        let mask = self.0;
        Direction::ALL
            .into_iter()
            .filter(move |d| mask & d.bit() != 0)
    }

    /// Number of edges touched
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Always false for a validated segment
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this strand ends inside the cell
    pub fn is_dead_end(&self) -> bool {
        self.len() == 1
    }
}

impl TryFrom<Vec<Direction>> for PathSegment {
    type Error = CardError;

    fn try_from(value: Vec<Direction>) -> Result<Self, Self::Error> {
        PathSegment::new(&value)
    }
}

impl From<PathSegment> for Vec<Direction> {
    fn from(segment: PathSegment) -> Self {
        segment.directions().collect()
    }
}

const FULL_SEGMENTS: &[PathSegment] = &[PathSegment::FULL];

/// Action cards. They never occupy the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    BreakPickaxe,
    BreakLantern,
    BreakCart,
    FixPickaxe,
    FixLantern,
    FixCart,
    ViewDestination,
    CaveIn,
}

impl ActionKind {
    /// All action kinds in deck order
    pub const ALL: [ActionKind; 8] = [
        ActionKind::BreakPickaxe,
        ActionKind::BreakLantern,
        ActionKind::BreakCart,
        ActionKind::FixPickaxe,
        ActionKind::FixLantern,
        ActionKind::FixCart,
        ActionKind::ViewDestination,
        ActionKind::CaveIn,
    ];

    /// Label printed on the card
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::BreakPickaxe => "Break Pickaxe",
            ActionKind::BreakLantern => "Break Lantern",
            ActionKind::BreakCart => "Break Cart",
            ActionKind::FixPickaxe => "Fix Pickaxe",
            ActionKind::FixLantern => "Fix Lantern",
            ActionKind::FixCart => "Fix Cart",
            ActionKind::ViewDestination => "View Map",
            ActionKind::CaveIn => "Cave In!",
        }
    }
}

/// What a card is, with the fields each kind requires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKind {
    /// The fixed, fully connected tile every tunnel traces back to
    Start,
    /// A fully connected goal tile (1-based index)
    Destination { index: u8 },
    /// A tunnel card; an empty list means the card exposes no edge
    Path { segments: Vec<PathSegment> },
    /// An action card, never placed on the board
    Action { action: ActionKind },
}

/// A single card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    id: String,
    #[serde(flatten)]
    kind: CardKind,
}

/// Unvalidated card shape used for deserialization
#[derive(Deserialize)]
struct RawCard {
    id: String,
    #[serde(flatten)]
    kind: CardKind,
}

impl TryFrom<RawCard> for Card {
    type Error = CardError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::with_kind(raw.id, raw.kind)
    }
}

impl Card {
    /// Build a card of any kind, validating kind-specific fields
    pub fn with_kind(id: impl Into<String>, kind: CardKind) -> Result<Self, CardError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CardError::EmptyId);
        }
        if let CardKind::Destination { index } = kind {
            if !(1..=MAX_DESTINATIONS).contains(&index) {
                return Err(CardError::InvalidDestination(index));
            }
        }
        Ok(Self { id, kind })
    }

    /// The start card
    pub fn start() -> Self {
        Self {
            id: START_CARD_ID.to_string(),
            kind: CardKind::Start,
        }
    }

    /// Destination card number `index` (1-3)
    pub fn destination(index: u8) -> Result<Self, CardError> {
        Self::with_kind(
            format!("{}{}", DESTINATION_PREFIX, index),
            CardKind::Destination { index },
        )
    }

    /// A path card from already validated segments
    pub fn path(id: impl Into<String>, segments: Vec<PathSegment>) -> Result<Self, CardError> {
        Self::with_kind(id, CardKind::Path { segments })
    }

    /// A path card from raw direction lists, e.g. `&[&[0, 2], &[1]]`
    pub fn from_paths<S: AsRef<[u8]>>(
        id: impl Into<String>,
        paths: &[S],
    ) -> Result<Self, CardError> {
        let segments = paths
            .iter()
            .map(|p| PathSegment::from_raw(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::path(id, segments)
    }

    /// An action card
    pub fn action(id: impl Into<String>, action: ActionKind) -> Result<Self, CardError> {
        Self::with_kind(id, CardKind::Action { action })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &CardKind {
        &self.kind
    }

    /// Tunnel strands on this card. Start and destination cards report one
    /// segment joining all four edges; action cards report none.
    pub fn segments(&self) -> &[PathSegment] {
        match &self.kind {
            CardKind::Start | CardKind::Destination { .. } => FULL_SEGMENTS,
            CardKind::Path { segments } => segments,
            CardKind::Action { .. } => &[],
        }
    }

    /// Whether any strand on this card reaches the given edge
    pub fn exposes(&self, direction: Direction) -> bool {
        self.segments().iter().any(|s| s.touches(direction))
    }

    /// Number of distinct edges reached by any strand
    pub fn exposed_edges(&self) -> usize {
        Direction::ALL.iter().filter(|d| self.exposes(**d)).count()
    }

    pub fn is_start(&self) -> bool {
        matches!(self.kind, CardKind::Start)
    }

    pub fn is_destination(&self) -> bool {
        matches!(self.kind, CardKind::Destination { .. })
    }

    pub fn is_path(&self) -> bool {
        matches!(self.kind, CardKind::Path { .. })
    }

    pub fn is_action(&self) -> bool {
        matches!(self.kind, CardKind::Action { .. })
    }

    /// Destination index, if this is a destination card
    pub fn destination_index(&self) -> Option<u8> {
        match self.kind {
            CardKind::Destination { index } => Some(index),
            _ => None,
        }
    }
}
