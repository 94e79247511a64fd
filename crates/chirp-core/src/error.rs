//! Error types module
//!
//! All failures an upload or delete can end in are unified under [`AppError`]. The
//! first nine variants are the pipeline's own taxonomy; the remaining ones cover the
//! ambient concerns around it (authentication, malformed forms, database, internal).
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected but well-formed requests like authorization failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from the client
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Unsupported extension: {0}")]
    UnsupportedExtension(String),

    #[error("Unsupported MIME type: {0}")]
    UnsupportedMimeType(String),

    #[error("File too large: {size} bytes exceeds max {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Unrecognized image content: {0}")]
    UnrecognizedImageContent(String),

    #[error("Missing association field: {0}")]
    MissingAssociationField(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidFilename(_) => (
            400,
            "INVALID_FILENAME",
            false,
            Some("Rename the file and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedExtension(_) => (
            400,
            "UNSUPPORTED_EXTENSION",
            false,
            Some("Choose a PNG, JPG, JPEG, GIF, or WEBP image"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMimeType(_) => (
            400,
            "UNSUPPORTED_MIME_TYPE",
            false,
            Some("Choose a PNG, JPG, JPEG, GIF, or WEBP image"),
            false,
            LogLevel::Debug,
        ),
        AppError::FileTooLarge { .. } => (
            413,
            "FILE_TOO_LARGE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnrecognizedImageContent(_) => (
            400,
            "UNRECOGNIZED_IMAGE_CONTENT",
            false,
            Some("Upload a genuine image file"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingAssociationField(_) => (
            400,
            "MISSING_ASSOCIATION_FIELD",
            false,
            Some("Provide the identifier field matching the upload type"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            403,
            "UNAUTHORIZED",
            false,
            None,
            false,
            LogLevel::Warn,
        ),
        AppError::Storage(_) => (
            502,
            "STORAGE_ERROR",
            false,
            Some("Resubmit the upload"),
            true,
            LogLevel::Error,
        ),
        AppError::RecordNotFound(_) => (
            404,
            "RECORD_NOT_FOUND",
            false,
            Some("Verify the record ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unauthenticated(_) => (
            401,
            "UNAUTHENTICATED",
            false,
            Some("Sign in and retry with a valid bearer token"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidFilename(_) => "InvalidFilename",
            AppError::UnsupportedExtension(_) => "UnsupportedExtension",
            AppError::UnsupportedMimeType(_) => "UnsupportedMimeType",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::UnrecognizedImageContent(_) => "UnrecognizedImageContent",
            AppError::MissingAssociationField(_) => "MissingAssociationField",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Storage(_) => "StorageError",
            AppError::RecordNotFound(_) => "RecordNotFound",
            AppError::Unauthenticated(_) => "Unauthenticated",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidFilename(ref msg) => msg.clone(),
            AppError::UnsupportedExtension(ref msg) => msg.clone(),
            AppError::UnsupportedMimeType(ref msg) => msg.clone(),
            AppError::FileTooLarge { max, .. } => format!(
                "Image is too large. Max file size is {} bytes.",
                max
            ),
            AppError::UnrecognizedImageContent(ref msg) => msg.clone(),
            AppError::MissingAssociationField(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::RecordNotFound(ref msg) => msg.clone(),
            AppError::Unauthenticated(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        let errors = [
            AppError::InvalidFilename("empty".to_string()),
            AppError::UnsupportedExtension("exe".to_string()),
            AppError::UnsupportedMimeType("text/plain".to_string()),
            AppError::UnrecognizedImageContent("evil.png".to_string()),
            AppError::MissingAssociationField("tweet_id".to_string()),
        ];
        for err in errors {
            assert_eq!(err.http_status_code(), 400, "{}", err);
            assert!(!err.is_recoverable());
            assert!(!err.is_sensitive());
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn test_error_metadata_file_too_large() {
        let err = AppError::FileTooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        };
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.error_code(), "FILE_TOO_LARGE");
        assert!(err.client_message().contains("5242880"));
        assert!(err.to_string().contains("6291456"));
    }

    #[test]
    fn test_error_metadata_unauthorized() {
        let err = AppError::Unauthorized("unauthorized user id".to_string());
        assert_eq!(err.http_status_code(), 403);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(err.client_message(), "unauthorized user id");
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_storage_hides_detail() {
        let err = AppError::Storage("AccessDenied: bucket policy rejects PutObject".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Failed to access storage");
        assert!(err.detailed_message().contains("AccessDenied"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_record_not_found() {
        let err = AppError::RecordNotFound("Image not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
        assert_eq!(err.client_message(), "Image not found");
    }

    #[test]
    fn test_error_metadata_unauthenticated() {
        let err = AppError::Unauthenticated("Missing authorization header".to_string());
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.error_type(), "Unauthenticated");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("root cause").context("outer"));
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Internal server error");
        assert!(err.detailed_message().contains("outer"));
    }
}
