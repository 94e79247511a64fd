//! Application state shared by every handler.

use crate::services::upload::UploadService;
use chirp_core::Config;
use chirp_db::ImageRecordStore;
use chirp_processing::ImageValidator;
use chirp_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub upload: UploadService,
}

impl AppState {
    /// Wire the upload pipeline from its injected collaborators.
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        records: Arc<dyn ImageRecordStore>,
    ) -> Self {
        let validator = ImageValidator::new(config.upload_limits().clone());
        let upload = UploadService::new(validator, storage.clone(), records);
        Self {
            config,
            storage,
            upload,
        }
    }
}
