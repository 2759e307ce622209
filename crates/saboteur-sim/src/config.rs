//! Simulation settings, read from a TOML file with environment overrides.

use crate::error::SimError;
use saboteur_core::{BotDifficulty, GameConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming the config file
pub const CONFIG_PATH_VAR: &str = "SABOTEUR_SIM_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of games to play
    pub matches: u32,
    /// OS threads sharing the matches
    pub workers: usize,
    /// Give up on a game after this many turns
    pub max_turns: u32,
    /// Base seed; random when unset
    pub seed: Option<u64>,
    pub difficulty: BotDifficulty,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            matches: 20,
            workers: 4,
            max_turns: 200,
            seed: None,
            difficulty: BotDifficulty::Medium,
            game: GameConfig::with_players(["Ana", "Bo", "Cy", "Di"]),
        }
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SimError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, SimError> {
        Ok(toml::from_str(contents)?)
    }

    /// File named by `SABOTEUR_SIM_CONFIG` (defaults when unset), then the
    /// `SIM_MATCHES` and `SIM_SEED` overrides
    pub fn from_env() -> Result<Self, SimError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(
            std::env::var("SIM_MATCHES").ok(),
            std::env::var("SIM_SEED").ok(),
        )?;
        Ok(config)
    }

    fn apply_overrides(
        &mut self,
        matches: Option<String>,
        seed: Option<String>,
    ) -> Result<(), SimError> {
        if let Some(value) = matches {
            self.matches = value.trim().parse().map_err(|_| SimError::InvalidOverride {
                name: "SIM_MATCHES",
                value,
            })?;
        }
        if let Some(value) = seed {
            let parsed = value.trim().parse().map_err(|_| SimError::InvalidOverride {
                name: "SIM_SEED",
                value,
            })?;
            self.seed = Some(parsed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use saboteur_core::Position;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(SimConfig::parse("").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = SimConfig::parse(
            r#"
            matches = 3
            workers = 1
            seed = 42
            difficulty = "Easy"

            [game]
            player_names = ["a", "b"]
            hand_size = 4

            [game.layout]
            size = 7
            start = { row = 6, col = 3 }
            destinations = [{ row = 0, col = 3 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.matches, 3);
        assert_eq!(config.workers, 1);
        assert_eq!(config.max_turns, 200);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.difficulty, BotDifficulty::Easy);
        assert_eq!(config.game.player_names, vec!["a", "b"]);
        assert_eq!(config.game.hand_size, 4);
        assert_eq!(config.game.layout.start, Position::new(6, 3));
        assert!(!config.game.include_action_cards);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            SimConfig::parse("matches = \"lots\""),
            Err(SimError::ParseConfig(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimConfig::load("/definitely/not/here.toml"),
            Err(SimError::ReadConfig { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = SimConfig::default();
        config
            .apply_overrides(Some("7".into()), Some(" 99 ".into()))
            .unwrap();
        assert_eq!(config.matches, 7);
        assert_eq!(config.seed, Some(99));

        let err = config.apply_overrides(None, Some("abc".into())).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidOverride {
                name: "SIM_SEED",
                ..
            }
        ));
        assert_eq!(config.seed, Some(99));
    }
}
