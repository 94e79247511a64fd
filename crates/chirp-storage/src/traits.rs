//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use chirp_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Storage abstraction trait
///
/// Objects are publicly readable through bucket policy; backends never set per-object
/// ACLs.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload `data` under `key` and return the object's public URL.
    async fn store(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<String>;

    /// Delete the object under `key`. Deleting a missing object succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public URL an object under `key` is served from.
    fn public_url(&self, key: &str) -> String;

    /// Name of the storage backend, for logs
    fn backend_type(&self) -> &'static str;
}

/// Reject keys that could escape the bucket root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.starts_with('/') || key.contains("..") || key.contains('\\') {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
