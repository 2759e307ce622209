//! Core game state machine.
//!
//! This module contains the main `GameState` struct and the turn logic that
//! sits around the placement engine: dealing, playing and discarding cards,
//! drawing replacements and detecting the end of the game.

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardError, BoardLayout};
use crate::card::Card;
use crate::connectivity::reached_destinations;
use crate::deck::{action_deck, shuffle_deck, standard_deck};
use crate::grid::Position;
use crate::placement::{check_placement, enumerate_legal_positions, PlacementError};
use crate::player::{Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

/// Cards dealt to each player at the start
pub const DEFAULT_HAND_SIZE: usize = 5;

/// Table setup for a new game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// One entry per seat, in turn order
    pub player_names: Vec<String>,
    pub hand_size: usize,
    pub layout: BoardLayout,
    /// Shuffle the action cards into the deck as well
    pub include_action_cards: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            hand_size: DEFAULT_HAND_SIZE,
            layout: BoardLayout::default(),
            include_action_cards: false,
        }
    }
}

impl GameConfig {
    /// Default setup with the given seats
    pub fn with_players<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            player_names: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), GameError> {
        let count = self.player_names.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(GameError::InvalidConfig(format!(
                "Need {} to {} players, got {}",
                MIN_PLAYERS, MAX_PLAYERS, count
            )));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig(
                "Hand size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A tunnel from the start opened onto a destination
    DestinationReached { winner: PlayerId, position: Position },
    /// Every hand and the deck ran dry first
    Exhausted,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameOutcome::DestinationReached { winner, .. } => Some(*winner),
            GameOutcome::Exhausted => None,
        }
    }
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players take turns placing or discarding
    InProgress,

    /// Game is over
    Finished { outcome: GameOutcome },
}

/// Errors that can occur when setting up a game or applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Don't have that card")]
    CardNotInHand,

    #[error("Invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),

    #[error("Game is over")]
    GameOver,

    #[error("Invalid game config: {0}")]
    InvalidConfig(String),

    #[error("Board error: {0}")]
    Board(#[from] BoardError),
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// All players
    pub players: Vec<Player>,
    /// Current player index
    pub current_player: PlayerId,
    /// Current game phase
    pub phase: GamePhase,
    /// Turn number (starts at 1)
    pub turn_number: u32,
    /// Draw pile; the top card is the last element
    pub deck: Vec<Card>,
    /// Cards discarded so far
    pub discard_pile: Vec<Card>,
    /// Destinations already linked to the start
    reached: BTreeSet<Position>,
}

impl GameState {
    /// Create a new game, shuffling with a fresh random generator
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Create a new game, shuffling with the given generator
    pub fn with_rng<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;

        let board = Board::with_layout(&config.layout)?;

        let mut deck = standard_deck();
        if config.include_action_cards {
            deck.extend(action_deck());
        }
        shuffle_deck(&mut deck, rng);

        let mut players: Vec<Player> = config
            .player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();

        for player in players.iter_mut() {
            for _ in 0..config.hand_size {
                match deck.pop() {
                    Some(card) => player.add_card(card),
                    None => break,
                }
            }
        }

        let reached = reached_destinations(&board);

        Ok(Self {
            board,
            players,
            current_player: 0,
            phase: GamePhase::InProgress,
            turn_number: 1,
            deck,
            discard_pile: Vec::new(),
            reached,
        })
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id as usize)
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Get the winner if the game is finished
    pub fn get_winner(&self) -> Option<PlayerId> {
        match self.phase {
            GamePhase::Finished { outcome } => outcome.winner(),
            GamePhase::InProgress => None,
        }
    }

    /// Destinations linked to the start so far
    pub fn reached(&self) -> &BTreeSet<Position> {
        &self.reached
    }

    /// Cells where a hand card of `player` could go.
    ///
    /// Empty when the player does not hold the card.
    pub fn legal_positions(&self, player: PlayerId, card_id: &str) -> BTreeSet<Position> {
        let card = self.get_player(player).and_then(|p| p.card(card_id));
        enumerate_legal_positions(&self.board, card)
    }

    /// Get all currently valid actions for a player.
    ///
    /// Placements come first, one per legal cell of each hand card, followed
    /// by one discard per hand card.
    pub fn valid_actions(&self, player: PlayerId) -> Vec<GameAction> {
        let mut actions = Vec::new();

        if self.is_finished() || player != self.current_player {
            return actions;
        }
        let hand = match self.get_player(player) {
            Some(p) => &p.hand,
            None => return actions,
        };

        for card in hand {
            for position in enumerate_legal_positions(&self.board, Some(card)) {
                actions.push(GameAction::PlaceCard {
                    card_id: card.id().to_string(),
                    position,
                });
            }
        }
        for card in hand {
            actions.push(GameAction::Discard {
                card_id: card.id().to_string(),
            });
        }

        actions
    }

    /// Apply an action and return the resulting events
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        let mut events = Vec::new();

        match action {
            GameAction::PlaceCard { card_id, position } => {
                let hand = self.get_player(player).ok_or(GameError::NotYourTurn)?;
                let card = hand.card(&card_id).ok_or(GameError::CardNotInHand)?;
                if let Err(reason) = check_placement(&self.board, position, card) {
                    debug!(player, card = %card_id, %position, %reason, "placement refused");
                    return Err(reason.into());
                }

                let card = self
                    .get_player_mut(player)
                    .and_then(|p| p.remove_card(&card_id))
                    .ok_or(GameError::CardNotInHand)?;
                self.board.place(position, card)?;
                events.push(GameEvent::CardPlaced {
                    player,
                    card_id,
                    position,
                });
                events.extend(self.draw(player));

                let newly_reached = self.check_destinations();
                if let Some(first) = newly_reached.first() {
                    for pos in &newly_reached {
                        let index = self
                            .board
                            .get(*pos)
                            .and_then(|c| c.destination_index())
                            .unwrap_or_default();
                        info!(player, position = %pos, index, "destination reached");
                        events.push(GameEvent::DestinationReached {
                            player,
                            position: *pos,
                            index,
                        });
                    }
                    events.extend(self.finish(GameOutcome::DestinationReached {
                        winner: player,
                        position: *first,
                    }));
                    return Ok(events);
                }
            }

            GameAction::Discard { card_id } => {
                let card = self
                    .get_player_mut(player)
                    .and_then(|p| p.remove_card(&card_id))
                    .ok_or(GameError::CardNotInHand)?;
                self.discard_pile.push(card);
                events.push(GameEvent::CardDiscarded { player, card_id });
                events.extend(self.draw(player));
            }
        }

        events.extend(self.advance_turn());
        Ok(events)
    }

    /// Top up a hand from the deck, if any cards are left
    fn draw(&mut self, player: PlayerId) -> Option<GameEvent> {
        let card = self.deck.pop()?;
        let deck_remaining = self.deck.len();
        self.get_player_mut(player)?.add_card(card);
        Some(GameEvent::CardDrawn {
            player,
            deck_remaining,
        })
    }

    /// Record destinations reached since the last check, in board order
    fn check_destinations(&mut self) -> Vec<Position> {
        let now = reached_destinations(&self.board);
        let fresh: Vec<Position> = now.difference(&self.reached).copied().collect();
        self.reached = now;
        fresh
    }

    /// Pass the turn to the next player still holding cards
    fn advance_turn(&mut self) -> Vec<GameEvent> {
        if self.deck.is_empty() && self.players.iter().all(|p| p.hand.is_empty()) {
            return self.finish(GameOutcome::Exhausted);
        }

        let count = self.players.len();
        let current = self.current_player as usize;
        let next = (1..=count)
            .map(|offset| (current + offset) % count)
            .find(|&idx| !self.players[idx].hand.is_empty())
            .unwrap_or((current + 1) % count) as PlayerId;

        let ended = self.current_player;
        self.current_player = next;
        self.turn_number += 1;

        vec![GameEvent::TurnEnded {
            player: ended,
            next_player: next,
        }]
    }

    fn finish(&mut self, outcome: GameOutcome) -> Vec<GameEvent> {
        let winner = outcome.winner();
        info!(?winner, turn = self.turn_number, "game over");
        self.phase = GamePhase::Finished { outcome };
        vec![GameEvent::GameOver { winner }]
    }
}
