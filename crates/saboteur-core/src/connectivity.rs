//! Reachability through the tunnel network.
//!
//! Nodes are occupied cells, plus one hypothetical cell holding the card being
//! tested. Two adjacent cells are linked when [`segments_connect`] holds
//! across their shared edge in both directions. A destination accepts any
//! neighbor, so the reverse check is what requires a strand facing it. The search is breadth-first
//! with an explicit queue and a visited table, so it terminates on rings of
//! cards and costs at most one visit per occupied cell.

use crate::board::Board;
use crate::card::Card;
use crate::compat::segments_connect;
use crate::grid::{Direction, Position};
use std::collections::{BTreeSet, VecDeque};
use tracing::trace;

/// Breadth-first walk over the network, yielding cells in visit order.
struct Walk<'a> {
    board: &'a Board,
    origin: Position,
    origin_card: &'a Card,
    /// Whether the walk continues through destination cards
    through_destinations: bool,
    visited: Vec<bool>,
    parents: Vec<Option<Position>>,
    frontier: VecDeque<Position>,
}

impl<'a> Walk<'a> {
    fn new(
        board: &'a Board,
        origin: Position,
        origin_card: &'a Card,
        through_destinations: bool,
    ) -> Self {
        let mut visited = vec![false; board.cell_count()];
        let mut frontier = VecDeque::new();
        if board.contains(origin) {
            visited[origin.index(board.size())] = true;
            frontier.push_back(origin);
        }

        Self {
            board,
            origin,
            origin_card,
            through_destinations,
            visited,
            parents: vec![None; board.cell_count()],
            frontier,
        }
    }

    /// The card occupying a cell, with the origin card standing in at the origin
    fn card_at(&self, pos: Position) -> Option<&'a Card> {
        if pos == self.origin {
            Some(self.origin_card)
        } else {
            self.board.get(pos)
        }
    }

    /// Cells from `pos` back to the origin, origin last
    fn trace_back(&self, pos: Position) -> Vec<Position> {
        let size = self.board.size();
        let mut route = vec![pos];
        let mut current = pos;
        while let Some(parent) = self.parents[current.index(size)] {
            route.push(parent);
            current = parent;
        }
        route
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Position, &'a Card);

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.board.size();

        while let Some(pos) = self.frontier.pop_front() {
            let card = match self.card_at(pos) {
                Some(card) => card,
                None => continue,
            };

            if self.through_destinations || !card.is_destination() {
                for (dir, next) in pos.neighbors(size) {
                    let idx = next.index(size);
                    if self.visited[idx] {
                        continue;
                    }
                    if let Some(next_card) = self.card_at(next) {
                        if linked(card, next_card, dir) {
                            self.visited[idx] = true;
                            self.parents[idx] = Some(pos);
                            self.frontier.push_back(next);
                        }
                    }
                }
            }

            return Some((pos, card));
        }

        None
    }
}

/// Two neighbors are linked only when each side connects to the other
fn linked(from: &Card, to: &Card, direction: Direction) -> bool {
    segments_connect(from, to, direction) && segments_connect(to, from, direction.opposite())
}

/// Whether `candidate`, if placed at `position`, would be linked back to the
/// start card through already placed, compatible cards.
///
/// The board is not modified. The start card itself is trivially connected.
pub fn has_route_to_start(board: &Board, position: Position, candidate: &Card) -> bool {
    if candidate.is_start() {
        return true;
    }
    let found = route_to_start(board, position, candidate).is_some();
    trace!(%position, card = candidate.id(), found, "start route search");
    found
}

/// Shortest chain of cells from `position` to the start cell, both ends
/// included, with `candidate` standing in at `position`.
pub fn route_to_start(
    board: &Board,
    position: Position,
    candidate: &Card,
) -> Option<Vec<Position>> {
    if !board.contains(position) {
        return None;
    }

    let mut walk = Walk::new(board, position, candidate, true);
    while let Some((pos, card)) = walk.next() {
        if card.is_start() {
            let mut route = walk.trace_back(pos);
            route.reverse();
            return Some(route);
        }
    }
    None
}

/// Destinations a start-connected tunnel points into.
///
/// A destination counts as reached when a card linked to the start exposes a
/// strand on the edge it shares with that destination. The walk does not pass
/// through destinations.
pub fn reached_destinations(board: &Board) -> BTreeSet<Position> {
    let mut reached = BTreeSet::new();
    let start = match board.start_position() {
        Some(pos) => pos,
        None => return reached,
    };
    let start_card = match board.get(start) {
        Some(card) => card,
        None => return reached,
    };

    for (pos, card) in Walk::new(board, start, start_card, false) {
        if card.is_destination() {
            continue;
        }
        for (dir, next, neighbor) in board.occupied_neighbors(pos) {
            if neighbor.is_destination() && card.exposes(dir) {
                reached.insert(next);
            }
        }
    }

    reached
}
