//! faceit-tracker - FACEIT player tracking bot
//!
//! Keeps a registry of tracked FACEIT players and answers slash commands
//! delivered over HTTP.

mod config;
mod db;
mod error;
mod faceit;
mod handlers;
mod http;
mod metrics;
mod players;
mod services;
mod telemetry;

use crate::config::{Config, StorageBackend};
use crate::db::Database;
use crate::faceit::FaceitClient;
use crate::handlers::Registry;
use crate::players::{MemoryRepository, PlayerRepository};
use crate::services::TrackingService;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validation::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {config_path}", errors.len());
    }

    info!(
        bot = %config.bot.name,
        game = %config.faceit.game,
        backend = ?config.storage.backend,
        "Starting faceit-tracker"
    );

    if config.http.metrics {
        metrics::init();
        info!("Metrics initialized");
    }

    // Initialize player storage
    let repo: Arc<dyn PlayerRepository> = match config.storage.backend {
        StorageBackend::Sqlite => {
            info!(path = %config.storage.path, "Opening SQLite player store");
            Arc::new(Database::new(&config.storage.path).await?.players())
        }
        StorageBackend::Memory => {
            info!("Using in-memory player store; tracked players are lost on exit");
            Arc::new(MemoryRepository::new())
        }
    };

    let tracked = repo.find_all().await?.len();
    metrics::set_tracked_players(tracked);
    info!(count = tracked, "Loaded tracked players");

    let profiles = Arc::new(FaceitClient::new(&config.faceit)?);
    let tracker = Arc::new(TrackingService::new(repo, profiles));
    let registry = Arc::new(Registry::new(&config.bot));

    http::run_http_server(
        config.http.listen,
        http::AppState {
            registry: Arc::clone(&registry),
            tracker,
        },
        config.http.metrics,
    )
    .await?;

    for (command, count) in registry.get_command_stats() {
        info!(command = %command, count, "Command usage");
    }
    info!("Shutdown complete");
    Ok(())
}
