//! Deck construction and shuffling.

use crate::card::{ActionKind, Card, PathSegment};
use crate::grid::Direction;
use rand::seq::SliceRandom;
use rand::Rng;

// Compass shorthand: N = Top, E = Right, S = Bottom, W = Left
use crate::grid::Direction::{Bottom as S, Left as W, Right as E, Top as N};

/// Path card shapes and how many copies of each go into the deck
const PATH_SHAPES: &[(&[&[Direction]], usize)] = &[
    // Single dead ends
    (&[&[N]], 2),
    (&[&[S]], 2),
    // Two dead ends
    (&[&[N], &[E]], 2),
    (&[&[N], &[S]], 2),
    (&[&[E], &[W]], 2),
    // Three dead ends
    (&[&[N], &[E], &[S]], 1),
    (&[&[N], &[E], &[W]], 1),
    // Four dead ends
    (&[&[N], &[E], &[S], &[W]], 1),
    // Straights and corners
    (&[&[N, S]], 4),
    (&[&[E, W]], 4),
    (&[&[N, E]], 4),
    (&[&[E, S]], 4),
    // Two-way paths with a dead end
    (&[&[N, S], &[E]], 2),
    (&[&[N, S], &[W]], 2),
    (&[&[E, S], &[N]], 2),
    (&[&[E, W], &[N]], 2),
    (&[&[E, W], &[S]], 2),
    // T-junctions
    (&[&[N, E, S]], 5),
    (&[&[E, S, W]], 5),
    // T-junctions with a dead end
    (&[&[N, E, S], &[W]], 2),
    (&[&[E, S, W], &[N]], 2),
    // Crossroads
    (&[&[N, E, S, W]], 5),
];

/// Copies of each action card in the action deck
const ACTION_COPIES: usize = 5;

/// Number of cards in [`standard_deck`]
pub fn standard_deck_size() -> usize {
    PATH_SHAPES.iter().map(|(_, count)| count).sum()
}

/// Build the standard path card deck, unshuffled.
///
/// Card ids are `path_{shape}_{copy}` with a 1-based copy number.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(standard_deck_size());

    for (shape_idx, (paths, count)) in PATH_SHAPES.iter().enumerate() {
        let segments: Vec<PathSegment> = paths
            .iter()
            .filter_map(|dirs| PathSegment::new(dirs).ok())
            .collect();

        for copy in 1..=*count {
            let id = format!("path_{}_{}", shape_idx, copy);
            if let Ok(card) = Card::path(id, segments.clone()) {
                deck.push(card);
            }
        }
    }

    deck
}

/// Build the action card deck, unshuffled
pub fn action_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(ActionKind::ALL.len() * ACTION_COPIES);

    for (kind_idx, kind) in ActionKind::ALL.iter().enumerate() {
        for copy in 1..=ACTION_COPIES {
            let id = format!("action_{}_{}", kind_idx, copy);
            if let Ok(card) = Card::action(id, *kind) {
                deck.push(card);
            }
        }
    }

    deck
}

/// Shuffle a deck in place
pub fn shuffle_deck<R: Rng>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_standard_deck_size() {
        let deck = standard_deck();
        assert_eq!(deck.len(), 58);
        assert_eq!(standard_deck_size(), 58);
        assert!(deck.iter().all(|c| c.is_path()));
    }

    #[test]
    fn test_card_ids_are_unique() {
        let deck = standard_deck();
        let ids: HashSet<&str> = deck.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), deck.len());
        assert!(ids.contains("path_0_1"));
        assert!(ids.contains("path_21_5"));
    }

    #[test]
    fn test_crossroads_count() {
        let crossroads = standard_deck()
            .into_iter()
            .filter(|c| c.segments() == &[PathSegment::FULL][..])
            .count();
        assert_eq!(crossroads, 5);
    }

    #[test]
    fn test_action_deck() {
        let deck = action_deck();
        assert_eq!(deck.len(), 40);
        assert!(deck.iter().all(|c| c.is_action()));
    }

    #[test]
    fn test_shuffle_is_deterministic_with_seed() {
        let mut a = standard_deck();
        let mut b = standard_deck();
        shuffle_deck(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle_deck(&mut b, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_ne!(a, standard_deck());
    }
}
