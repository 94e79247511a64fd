use chirp_core::{AppError, ErrorMetadata, LogLevel};
use chirp_processing::ValidationError;

/// Pipeline steps an upload moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UploadStage {
    Received,
    Sanitized,
    AllowlistChecked,
    SizeChecked,
    ContentSniffed,
    Authorized,
    Stored,
    Persisted,
}

impl UploadStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStage::Received => "received",
            UploadStage::Sanitized => "sanitized",
            UploadStage::AllowlistChecked => "allowlist_checked",
            UploadStage::SizeChecked => "size_checked",
            UploadStage::ContentSniffed => "content_sniffed",
            UploadStage::Authorized => "authorized",
            UploadStage::Stored => "stored",
            UploadStage::Persisted => "persisted",
        }
    }

    /// Step that was being attempted when validation failed with `err`.
    pub fn for_validation_error(err: &ValidationError) -> Self {
        match err {
            ValidationError::InvalidFilename(_) => UploadStage::Sanitized,
            ValidationError::UnsupportedExtension { .. }
            | ValidationError::UnsupportedMimeType { .. } => UploadStage::AllowlistChecked,
            ValidationError::FileTooLarge { .. } => UploadStage::SizeChecked,
            ValidationError::UnrecognizedImageContent(_) | ValidationError::Io(_) => {
                UploadStage::ContentSniffed
            }
        }
    }
}

/// Log an aborted upload at the error's own level and hand the error back.
pub(crate) fn aborted(stage: UploadStage, error: AppError) -> AppError {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(stage = stage.as_str(), error = %error, error_type, "Upload aborted");
        }
        LogLevel::Warn => {
            tracing::warn!(stage = stage.as_str(), error = %error, error_type, "Upload aborted");
        }
        LogLevel::Error => {
            tracing::error!(stage = stage.as_str(), error = %error, error_type, "Upload aborted");
        }
    }
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_ordered() {
        assert!(UploadStage::Received < UploadStage::Sanitized);
        assert!(UploadStage::ContentSniffed < UploadStage::Authorized);
        assert!(UploadStage::Authorized < UploadStage::Stored);
        assert!(UploadStage::Stored < UploadStage::Persisted);
    }

    #[test]
    fn test_stage_for_validation_error() {
        assert_eq!(
            UploadStage::for_validation_error(&ValidationError::FileTooLarge { size: 2, max: 1 }),
            UploadStage::SizeChecked
        );
        assert_eq!(
            UploadStage::for_validation_error(&ValidationError::UnsupportedMimeType {
                content_type: "text/plain".to_string(),
                allowed: vec![],
            }),
            UploadStage::AllowlistChecked
        );
        assert_eq!(
            UploadStage::for_validation_error(&ValidationError::UnrecognizedImageContent(
                String::new()
            )),
            UploadStage::ContentSniffed
        );
    }
}
