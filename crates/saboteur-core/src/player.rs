//! Player state.
//!
//! A player is a seat at the table holding a hand of cards. Roles, scores and
//! tool damage are not tracked.

use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Player identifier (index into the player list)
pub type PlayerId = u8;

/// Minimum number of players at the table
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players at the table
pub const MAX_PLAYERS: usize = 10;

/// A player and their hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
        }
    }

    /// Add a card to the hand
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Look up a hand card by id
    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.hand.iter().find(|c| c.id() == card_id)
    }

    /// Check if the hand holds a card with this id
    pub fn has_card(&self, card_id: &str) -> bool {
        self.card(card_id).is_some()
    }

    /// Take a card out of the hand, keeping the order of the rest
    pub fn remove_card(&mut self, card_id: &str) -> Option<Card> {
        let idx = self.hand.iter().position(|c| c.id() == card_id)?;
        Some(self.hand.remove(idx))
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }
}
