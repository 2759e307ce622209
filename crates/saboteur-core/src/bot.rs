//! AI bot players.
//!
//! This module provides different difficulty levels of AI players:
//! - Easy: Random valid moves, building whenever it can
//! - Medium: Digs toward the closest destination not yet reached

use crate::actions::GameAction;
use crate::game::GameState;
use crate::grid::Position;
use crate::player::PlayerId;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
}

impl std::str::FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "medium" => Ok(BotDifficulty::Medium),
            other => Err(format!("Unknown bot difficulty: {}", other)),
        }
    }
}

/// A bot player that can decide on actions
pub struct Bot {
    pub player_id: PlayerId,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(player_id: PlayerId, difficulty: BotDifficulty) -> Self {
        Self {
            player_id,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player_id: PlayerId, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            player_id,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose an action from the valid actions
    pub fn choose_action(&mut self, game: &GameState) -> Option<GameAction> {
        let valid_actions = game.valid_actions(self.player_id);
        if valid_actions.is_empty() {
            return None;
        }

        let (placements, discards): (Vec<GameAction>, Vec<GameAction>) =
            valid_actions.into_iter().partition(|a| a.is_placement());

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&placements, &discards),
            BotDifficulty::Medium => self.choose_medium(game, &placements, &discards),
        }
    }

    /// Easy: any placement, or any discard when nothing fits
    fn choose_easy(
        &mut self,
        placements: &[GameAction],
        discards: &[GameAction],
    ) -> Option<GameAction> {
        placements
            .choose(&mut self.rng)
            .or_else(|| discards.choose(&mut self.rng))
            .cloned()
    }

    /// Medium: the placement closest to an open destination, otherwise throw
    /// away the least useful card
    fn choose_medium(
        &mut self,
        game: &GameState,
        placements: &[GameAction],
        discards: &[GameAction],
    ) -> Option<GameAction> {
        let targets: Vec<Position> = game
            .board
            .destination_positions()
            .into_iter()
            .filter(|pos| !game.reached().contains(pos))
            .collect();

        if !placements.is_empty() {
            if targets.is_empty() {
                return placements.choose(&mut self.rng).cloned();
            }

            let scored: Vec<(u32, &GameAction)> = placements
                .iter()
                .filter_map(|action| match action {
                    GameAction::PlaceCard { position, .. } => {
                        Some((distance_to_nearest(*position, &targets), action))
                    }
                    GameAction::Discard { .. } => None,
                })
                .collect();
            let best = scored.iter().map(|(score, _)| *score).min()?;
            let tied: Vec<&GameAction> = scored
                .iter()
                .filter(|(score, _)| *score == best)
                .map(|(_, action)| *action)
                .collect();
            return tied.choose(&mut self.rng).map(|a| (*a).clone());
        }

        let hand = &game.get_player(self.player_id)?.hand;
        discards
            .iter()
            .min_by_key(|action| {
                hand.iter()
                    .find(|c| c.id() == action.card_id())
                    .map(|c| c.exposed_edges())
                    .unwrap_or(0)
            })
            .cloned()
    }
}

/// Manhattan distance from `position` to the closest of `targets`
fn distance_to_nearest(position: Position, targets: &[Position]) -> u32 {
    targets
        .iter()
        .map(|t| position.distance_to(t))
        .min()
        .unwrap_or(u32::MAX)
}
