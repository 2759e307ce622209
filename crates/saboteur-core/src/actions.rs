//! Game actions that players can take.
//!
//! This module defines all possible actions in the game and the events
//! that result from those actions.

use crate::grid::Position;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take on their turn
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    /// Put a path card from hand onto the board
    PlaceCard { card_id: String, position: Position },
    /// Throw a hand card away instead of building
    Discard { card_id: String },
}

impl GameAction {
    /// Id of the hand card the action spends
    pub fn card_id(&self) -> &str {
        match self {
            GameAction::PlaceCard { card_id, .. } | GameAction::Discard { card_id } => card_id,
        }
    }

    pub fn is_placement(&self) -> bool {
        matches!(self, GameAction::PlaceCard { .. })
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was committed to the board
    CardPlaced {
        player: PlayerId,
        card_id: String,
        position: Position,
    },

    /// A card left a hand without being played
    CardDiscarded { player: PlayerId, card_id: String },

    /// A replacement was drawn from the deck
    CardDrawn {
        player: PlayerId,
        deck_remaining: usize,
    },

    /// A tunnel linked to the start now opens onto a destination
    DestinationReached {
        player: PlayerId,
        position: Position,
        index: u8,
    },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },

    /// The game finished, with the winner if a destination was reached
    GameOver { winner: Option<PlayerId> },
}
