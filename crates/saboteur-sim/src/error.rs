//! Simulation errors.

use saboteur_core::{GameError, PlayerId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Cannot read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {name}")]
    InvalidOverride { name: &'static str, value: String },

    #[error("Game error in match {index}: {source}")]
    Game { index: u32, source: GameError },

    #[error("Player {player} had no action in match {index}")]
    NoAction { index: u32, player: PlayerId },

    #[error("Worker thread panicked")]
    WorkerPanicked,
}
