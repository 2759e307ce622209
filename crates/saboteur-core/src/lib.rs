//! Saboteur core - tunnel placement engine for a Saboteur-style mining game
//!
//! This crate provides the core game logic, including:
//! - A square grid with start and destination cards pre-placed
//! - Path cards made of segments that open onto card edges
//! - Placement validation: edge matching against neighbors and a tunnel
//!   route back to the start
//! - A turn-based game state machine with hands, a deck and bots
//!
//! # Architecture
//!
//! The validation engine is a set of pure functions over a read-only
//! [`Board`] snapshot, so any number of threads can query one board at once.
//! Mutation only happens in [`GameState::apply_action`]. The crate can be
//! compiled to:
//! - Native Rust for tools and simulations
//! - WebAssembly for a browser client
//!
//! # Modules
//!
//! - [`grid`]: Directions and board positions
//! - [`card`]: Cards and their path segments
//! - [`deck`]: The standard deck
//! - [`board`]: Board snapshot and layouts
//! - [`compat`]: Edge compatibility between two neighbors
//! - [`connectivity`]: Routes through the tunnel network
//! - [`placement`]: Placement rules and legal-cell enumeration
//! - [`game`]: Game state machine

pub mod actions;
pub mod board;
pub mod bot;
pub mod card;
pub mod compat;
pub mod connectivity;
pub mod deck;
pub mod game;
pub mod grid;
pub mod placement;
pub mod player;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{Board, BoardError, BoardJson, BoardLayout, PlacedCard};
pub use bot::{Bot, BotDifficulty};
pub use card::{ActionKind, Card, CardError, CardKind, PathSegment};
pub use compat::{edges_agree, segments_connect, segments_connect_raw};
pub use connectivity::{has_route_to_start, reached_destinations, route_to_start};
pub use deck::{action_deck, shuffle_deck, standard_deck};
pub use game::{GameConfig, GameError, GameOutcome, GamePhase, GameState};
pub use grid::{Direction, Position, BOARD_SIZE};
pub use placement::{
    check_placement, enumerate_legal_positions, is_legal_placement, PlacementError,
};
pub use player::{Player, PlayerId};
