//! Bot-vs-bot match runner.
//!
//! Each match owns its own `GameState`, so workers share nothing but the
//! read-only config.

use crate::config::SimConfig;
use crate::error::SimError;
use saboteur_core::{Bot, GameOutcome, GamePhase, GameState, PlayerId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use tracing::{debug, warn};

/// Result of one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub index: u32,
    pub seed: u64,
    pub turns: u32,
    /// `None` when the turn limit was hit first
    pub outcome: Option<GameOutcome>,
    /// Path cards on the board at the end
    pub cards_placed: usize,
}

/// Aggregate over many matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub matches: usize,
    /// Wins per seat
    pub wins: Vec<u32>,
    pub exhausted: u32,
    pub unfinished: u32,
    pub total_turns: u64,
}

impl Summary {
    pub fn from_reports(reports: &[MatchReport], seats: usize) -> Self {
        let mut summary = Summary {
            matches: reports.len(),
            wins: vec![0; seats],
            ..Summary::default()
        };

        for report in reports {
            summary.total_turns += u64::from(report.turns);
            match report.outcome {
                Some(GameOutcome::DestinationReached { winner, .. }) => {
                    if let Some(count) = summary.wins.get_mut(winner as usize) {
                        *count += 1;
                    }
                }
                Some(GameOutcome::Exhausted) => summary.exhausted += 1,
                None => summary.unfinished += 1,
            }
        }

        summary
    }

    pub fn average_turns(&self) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.matches as f64
        }
    }
}

/// Play one match to the end, or until the turn limit
pub fn run_match(config: &SimConfig, index: u32, seed: u64) -> Result<MatchReport, SimError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::with_rng(config.game.clone(), &mut rng)
        .map_err(|source| SimError::Game { index, source })?;

    let mut bots: Vec<Bot> = (0..game.player_count())
        .map(|i| Bot::with_seed(i as PlayerId, config.difficulty, seed.wrapping_add(i as u64 + 1)))
        .collect();

    let mut turns = 0;
    while !game.is_finished() && turns < config.max_turns {
        let player = game.current_player;
        let action = bots
            .get_mut(player as usize)
            .and_then(|bot| bot.choose_action(&game))
            .ok_or(SimError::NoAction { index, player })?;

        debug!(index, player, ?action, "bot move");
        game.apply_action(player, action)
            .map_err(|source| SimError::Game { index, source })?;
        turns += 1;
    }

    let outcome = match game.phase {
        GamePhase::Finished { outcome } => Some(outcome),
        GamePhase::InProgress => {
            warn!(index, turns, "turn limit reached");
            None
        }
    };

    Ok(MatchReport {
        index,
        seed,
        turns,
        outcome,
        cards_placed: game.board.occupied().filter(|(_, c)| c.is_path()).count(),
    })
}

/// Play every configured match across the worker threads, in index order
pub fn run_all(config: &SimConfig, base_seed: u64) -> Result<Vec<MatchReport>, SimError> {
    let workers = config.workers.clamp(1, config.matches.max(1) as usize);

    let mut reports = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    (0..config.matches)
                        .filter(|index| *index as usize % workers == worker)
                        .map(|index| run_match(config, index, base_seed.wrapping_add(index as u64)))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            let batch = handle.join().map_err(|_| SimError::WorkerPanicked)??;
            all.extend(batch);
        }
        Ok::<_, SimError>(all)
    })?;

    reports.sort_by_key(|r| r.index);
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saboteur_core::{BotDifficulty, GameConfig};

    fn config(matches: u32, workers: usize) -> SimConfig {
        SimConfig {
            matches,
            workers,
            max_turns: 200,
            seed: Some(1),
            difficulty: BotDifficulty::Easy,
            game: GameConfig::with_players(["a", "b", "c"]),
        }
    }

    #[test]
    fn test_run_match_finishes() {
        let report = run_match(&config(1, 1), 0, 17).unwrap();
        assert!(report.outcome.is_some());
        assert!(report.turns > 0);
        assert_eq!(report.seed, 17);
    }

    #[test]
    fn test_run_match_is_deterministic() {
        let cfg = config(1, 1);
        assert_eq!(run_match(&cfg, 0, 5).unwrap(), run_match(&cfg, 0, 5).unwrap());
    }

    #[test]
    fn test_turn_limit() {
        let mut cfg = config(1, 1);
        cfg.max_turns = 1;
        let report = run_match(&cfg, 0, 3).unwrap();
        assert_eq!(report.turns, 1);
        assert_eq!(report.outcome, None);
    }

    #[test]
    fn test_bad_game_config() {
        let mut cfg = config(1, 1);
        cfg.game.player_names.truncate(1);
        assert!(matches!(
            run_match(&cfg, 4, 0),
            Err(SimError::Game { index: 4, .. })
        ));
    }

    #[test]
    fn test_workers_do_not_change_results() {
        let single = run_all(&config(6, 1), 100).unwrap();
        let parallel = run_all(&config(6, 3), 100).unwrap();
        assert_eq!(single, parallel);
        assert_eq!(
            single.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_summary() {
        let reports = vec![
            MatchReport {
                index: 0,
                seed: 0,
                turns: 10,
                outcome: Some(GameOutcome::DestinationReached {
                    winner: 1,
                    position: saboteur_core::Position::new(1, 4),
                }),
                cards_placed: 6,
            },
            MatchReport {
                index: 1,
                seed: 1,
                turns: 30,
                outcome: Some(GameOutcome::Exhausted),
                cards_placed: 20,
            },
            MatchReport {
                index: 2,
                seed: 2,
                turns: 200,
                outcome: None,
                cards_placed: 40,
            },
        ];
        let summary = Summary::from_reports(&reports, 2);
        assert_eq!(summary.matches, 3);
        assert_eq!(summary.wins, vec![0, 1]);
        assert_eq!(summary.exhausted, 1);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.average_turns(), 80.0);
    }
}
