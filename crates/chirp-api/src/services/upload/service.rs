use std::io::Cursor;
use std::sync::Arc;

use chirp_core::models::{ImageRecord, NewImageRecord};
use chirp_core::AppError;
use chirp_db::ImageRecordStore;
use chirp_processing::{generate_storage_key, ImageValidator};
use chirp_storage::Storage;

use super::association::{resolve_association, UploadRequest};
use super::stage::{aborted, UploadStage};

/// Drives uploads and deletes against injected storage and record store.
///
/// Nothing touches storage until the image is validated and the association is
/// authorized and known to exist.
#[derive(Clone)]
pub struct UploadService {
    validator: ImageValidator,
    storage: Arc<dyn Storage>,
    records: Arc<dyn ImageRecordStore>,
}

impl UploadService {
    pub fn new(
        validator: ImageValidator,
        storage: Arc<dyn Storage>,
        records: Arc<dyn ImageRecordStore>,
    ) -> Self {
        Self {
            validator,
            storage,
            records,
        }
    }

    pub fn validator(&self) -> &ImageValidator {
        &self.validator
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            size_bytes = request.data.len(),
            kind = request.kind.as_deref().unwrap_or(""),
        )
    )]
    pub async fn upload(
        &self,
        principal: i32,
        request: UploadRequest,
    ) -> Result<ImageRecord, AppError> {
        tracing::debug!(stage = UploadStage::Received.as_str(), "Upload received");

        let mut stream = Cursor::new(request.data.clone());
        let validated = self
            .validator
            .validate(
                &mut stream,
                request.filename.as_deref(),
                request.content_type.as_deref(),
            )
            .map_err(|e| aborted(UploadStage::for_validation_error(&e), e.into()))?;

        let association = resolve_association(principal, &request)
            .map_err(|e| aborted(UploadStage::Authorized, e))?;

        let target_exists = self
            .records
            .target_exists(&association)
            .await
            .map_err(|e| aborted(UploadStage::Authorized, e))?;
        if !target_exists {
            return Err(aborted(
                UploadStage::Authorized,
                AppError::RecordNotFound(format!(
                    "{} {} not found",
                    association.kind(),
                    association.target_id()
                )),
            ));
        }
        tracing::debug!(
            stage = UploadStage::Authorized.as_str(),
            association = %association.kind(),
            target_id = association.target_id(),
            "Association authorized"
        );

        let key = generate_storage_key(validated.extension());
        let url = self
            .storage
            .store(&key, request.data, validated.content_type())
            .await
            .map_err(|e| aborted(UploadStage::Stored, e.into()))?;
        tracing::debug!(stage = UploadStage::Stored.as_str(), key = %key, "Image stored");

        let new_record = NewImageRecord {
            user_id: principal,
            url,
            key: key.clone(),
            association,
        };

        let record = match self.records.insert(new_record).await {
            Ok(record) => record,
            Err(e) => {
                // No record points at the object, so it would be orphaned
                if let Err(cleanup_err) = self.storage.delete(&key).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        key = %key,
                        "Failed to delete stored image after record insert failed"
                    );
                }
                return Err(aborted(UploadStage::Persisted, e));
            }
        };

        tracing::info!(
            stage = UploadStage::Persisted.as_str(),
            image_id = record.id,
            key = %record.key,
            format = %validated.format(),
            size_bytes = validated.size(),
            "Image uploaded"
        );

        Ok(record)
    }

    /// Delete the image record `id` and its object, provided `principal` owns it and
    /// `key` is the record's own key.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, principal: i32, id: i32, key: &str) -> Result<(), AppError> {
        let record = self
            .records
            .get(id)
            .await?
            .ok_or_else(|| AppError::RecordNotFound("Image not found".to_string()))?;

        if record.user_id != principal {
            return Err(AppError::Unauthorized(
                "You are unauthorized to delete this image".to_string(),
            ));
        }

        if record.key != key {
            return Err(AppError::RecordNotFound("Image not found".to_string()));
        }

        self.storage.delete(&record.key).await?;

        if !self.records.delete(id).await? {
            return Err(AppError::RecordNotFound("Image not found".to_string()));
        }

        tracing::info!(image_id = id, key = %record.key, "Image deleted");
        Ok(())
    }
}
