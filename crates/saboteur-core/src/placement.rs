//! Placement validation.
//!
//! A card may be dropped on a cell when all of these hold:
//! 1. the cell is on the board and empty
//! 2. the card is not an action card
//! 3. at least one neighbor holds a non-destination card (skipped for the
//!    start card)
//! 4. the card agrees with every occupied neighbor, destinations included:
//!    no strand may run into a blank edge, and no neighbor strand may run
//!    into one of ours
//! 5. the card has a tunnel route back to the start
//!
//! All checks are pure reads of the board snapshot.

use crate::board::Board;
use crate::card::Card;
use crate::compat::edges_agree;
use crate::connectivity::has_route_to_start;
use crate::grid::{Direction, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlacementError {
    #[error("Position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("Position {0} is already occupied")]
    Occupied(Position),

    #[error("Action cards cannot be placed on the board")]
    NotPlaceable,

    #[error("No adjacent tunnel card to build from")]
    NoAnchor,

    #[error("Paths do not match the neighbor toward {direction:?}")]
    PathMismatch { direction: Direction },

    #[error("No tunnel route back to the start")]
    NoRouteToStart,
}

/// Check every placement rule, reporting the first one that fails
pub fn check_placement(
    board: &Board,
    position: Position,
    card: &Card,
) -> Result<(), PlacementError> {
    if !board.contains(position) {
        return Err(PlacementError::OutOfBounds(position));
    }
    if board.is_occupied(position) {
        return Err(PlacementError::Occupied(position));
    }
    if card.is_action() {
        return Err(PlacementError::NotPlaceable);
    }

    // The start card is pre-placed and needs no anchor
    if !card.is_start() {
        let anchored = board
            .occupied_neighbors(position)
            .any(|(_, _, neighbor)| !neighbor.is_destination());
        if !anchored {
            return Err(PlacementError::NoAnchor);
        }
    }

    for (direction, _, neighbor) in board.occupied_neighbors(position) {
        if !edges_agree(card, neighbor, direction) {
            return Err(PlacementError::PathMismatch { direction });
        }
    }

    if !has_route_to_start(board, position, card) {
        return Err(PlacementError::NoRouteToStart);
    }

    Ok(())
}

/// Whether `card` may be placed at `position`
pub fn is_legal_placement(board: &Board, position: Position, card: &Card) -> bool {
    match check_placement(board, position, card) {
        Ok(()) => true,
        Err(reason) => {
            debug!(%position, card = card.id(), %reason, "placement rejected");
            false
        }
    }
}

/// Every cell where `card` may legally be placed.
///
/// Scans the whole board; with no card selected the set is empty.
pub fn enumerate_legal_positions(board: &Board, card: Option<&Card>) -> BTreeSet<Position> {
    let card = match card {
        Some(card) => card,
        None => return BTreeSet::new(),
    };

    board
        .positions()
        .filter(|pos| check_placement(board, *pos, card).is_ok())
        .collect()
}
