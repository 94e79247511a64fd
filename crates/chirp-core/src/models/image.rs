use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::association::Association;

/// Persisted link between a stored object and the entity that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i32,
    /// User who uploaded the image; the only principal allowed to delete it.
    pub user_id: i32,
    pub url: String,
    pub key: String,
    pub association: Association,
}

/// Record to insert after the object has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImageRecord {
    pub user_id: i32,
    pub url: String,
    pub key: String,
    pub association: Association,
}

/// Response body for a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageUploadResponse {
    /// Image record ID
    pub id: i32,
    /// Public URL of the stored object
    pub url: String,
    /// Storage key, needed to delete the image later
    pub key: String,
}

impl From<ImageRecord> for ImageUploadResponse {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            url: record.url,
            key: record.key,
        }
    }
}

/// Response body for a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImageDeleteResponse {
    pub message: String,
}
