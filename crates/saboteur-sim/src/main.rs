//! Headless bot-vs-bot runner for the Saboteur engine.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod sim;

use config::SimConfig;
use sim::Summary;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimConfig::from_env()?;
    let base_seed = config.seed.unwrap_or_else(rand::random);

    info!(
        matches = config.matches,
        workers = config.workers,
        players = config.game.player_names.len(),
        difficulty = ?config.difficulty,
        base_seed,
        "Starting simulation"
    );

    let reports = sim::run_all(&config, base_seed)?;
    for report in &reports {
        let winner = report.outcome.and_then(|o| o.winner());
        info!(
            index = report.index,
            seed = report.seed,
            turns = report.turns,
            cards = report.cards_placed,
            ?winner,
            finished = report.outcome.is_some(),
            "match done"
        );
    }

    let summary = Summary::from_reports(&reports, config.game.player_names.len());
    info!(
        matches = summary.matches,
        wins = ?summary.wins,
        exhausted = summary.exhausted,
        unfinished = summary.unfinished,
        average_turns = summary.average_turns(),
        "Simulation complete"
    );

    Ok(())
}
