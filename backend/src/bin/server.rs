//! Intramural HTTP Server Binary
//!
//! This is the main entry point for the intramural REST API server.
//! It loads configuration, initializes the repository, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the local (in-memory) repository (default)
//! cargo run --bin intramural-server
//!
//! # Use an explicit config file
//! INTRAMURAL_CONFIG=./intramural.toml cargo run --bin intramural-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Repository backend (default: local)
//! - `DEFAULT_VENUE`: Venue for games created without one (default: TBD)
//! - `INTRAMURAL_CONFIG`: Path to the TOML config file
//! - `RUST_LOG`: Log filter (default: info)

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use intramural::config::AppConfig;
use intramural::db::RepositoryFactory;
use intramural::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting intramural HTTP server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    let repository = RepositoryFactory::from_settings(&config.repository)
        .context("Failed to initialize repository")?;
    info!(
        repository = %config.repository.repo_type,
        default_venue = %config.scheduling.default_venue,
        "Repository initialized successfully"
    );

    let addr = config.bind_address()?;
    let state = AppState::with_settings(repository, config.scheduling);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
