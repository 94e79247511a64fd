use crate::{S3Storage, Storage, StorageResult};
use chirp_core::Config;
use std::sync::Arc;

/// Create the storage backend described by configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let settings = config.storage();
    let storage = S3Storage::new(settings)?;

    tracing::info!(
        backend = storage.backend_type(),
        bucket = %settings.bucket,
        region = %settings.region,
        endpoint = ?settings.endpoint,
        "Storage backend configured"
    );

    Ok(Arc::new(storage))
}
