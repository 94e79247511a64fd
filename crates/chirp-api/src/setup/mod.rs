//! Application setup and initialization
//!
//! Startup runs in a fixed order: validate configuration, install tracing, connect the
//! database, build the storage client, then assemble state and routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use chirp_core::Config;
use chirp_db::ImageRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())?;

    tracing::info!(
        environment = config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;

    let storage = storage::setup_storage(&config)?;

    let records = Arc::new(ImageRepository::new(pool));
    let state = Arc::new(AppState::new(config.clone(), storage, records));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
