//! Storage setup and initialization

use anyhow::{Context, Result};
use chirp_core::Config;
use chirp_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the process-wide storage client handed to the upload pipeline.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config).context("Failed to initialize storage")?;
    tracing::info!(
        backend = storage.backend_type(),
        bucket = %config.storage().bucket,
        "Storage initialized successfully"
    );
    Ok(storage)
}
