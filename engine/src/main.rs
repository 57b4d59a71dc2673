//! Carbon Tracker replay tool
//!
//! Loads the engine configuration, replays a person's daily reports from a
//! JSON file through the tracking pipeline and prints the result as JSON.
//!
//! Usage: `carbon-tracker <replay.json>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use carbon_tracker_engine::{
    config::EngineConfig,
    replay::{replay, ReplayFile},
    state::EngineState,
};
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = EngineConfig::load()?;

    // Initialize tracing
    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if EngineConfig::is_production() { "production" } else { "development" },
        "Starting Carbon Tracker replay"
    );

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: carbon-tracker <replay.json>")?;

    let state = EngineState::from_config(config)?;
    let file = ReplayFile::load(&path)
        .with_context(|| format!("failed to read replay file {}", path.display()))?;

    let result = replay(&state, file, Utc::now());
    info!(
        recorded = result.outcomes.len(),
        rejected = result.rejected.len(),
        "Replay complete"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout carries only the JSON result.
fn init_tracing(config: &EngineConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if EngineConfig::is_production() {
            "carbon_tracker_engine=info,carbon_tracker_shared=info".into()
        } else {
            "carbon_tracker_engine=debug,carbon_tracker_shared=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.json_logs() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
