//! Edge compatibility between two adjacent cards.

use crate::card::Card;
use crate::grid::Direction;

/// Whether `from` and `to` join across the edge in `direction` (from `from`'s
/// cell toward `to`'s cell).
///
/// A destination on the receiving side always accepts: it is an open socket
/// and never constrains the network. Otherwise both cards must offer a strand
/// on the shared edge. Two blank edges are "no connection", not a conflict;
/// deciding whether that matters is left to the caller.
pub fn segments_connect(from: &Card, to: &Card, direction: Direction) -> bool {
    if to.is_destination() {
        return true;
    }
    from.exposes(direction) && to.exposes(direction.opposite())
}

/// Whether two adjacent cards can sit side by side across `direction`.
///
/// Either both cards run a strand onto the shared edge or neither does; a
/// strand running into a blank wall is a conflict. Destinations on the
/// receiving side accept anything, as in [`segments_connect`].
pub fn edges_agree(from: &Card, to: &Card, direction: Direction) -> bool {
    if to.is_destination() {
        return true;
    }
    from.exposes(direction) == to.exposes(direction.opposite())
}

/// [`segments_connect`] for a raw direction value. Anything outside 0..=3 is
/// treated as incompatible.
pub fn segments_connect_raw(from: &Card, to: &Card, direction: u8) -> bool {
    Direction::try_from(direction)
        .map(|dir| segments_connect(from, to, dir))
        .unwrap_or(false)
}
