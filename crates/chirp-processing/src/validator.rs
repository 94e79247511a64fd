use std::io::{Read, Seek};

use chirp_core::constants::SNIFF_WINDOW_BYTES;
use chirp_core::{AppError, ImageFormat, UploadLimits};

use crate::allowlist::{check_content_type, check_extension};
use crate::filename::sanitize_filename;
use crate::sniff::sniff_format;
use crate::stream::{measure_len, read_header};

/// Reasons an upload is rejected before it reaches storage
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Unsupported extension: '{extension}' (allowed: {allowed:?})")]
    UnsupportedExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Unsupported MIME type: '{content_type}' (allowed: {allowed:?})")]
    UnsupportedMimeType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("File content is not a recognized image: {0}")]
    UnrecognizedImageContent(String),

    #[error("Failed to read upload stream: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidFilename(msg) => AppError::InvalidFilename(msg),
            ValidationError::UnsupportedExtension { extension, allowed } => {
                AppError::UnsupportedExtension(if extension.is_empty() {
                    format!("File has no extension. Allowed: {}", allowed.join(", "))
                } else {
                    format!(
                        "Extension '{}' is not allowed. Allowed: {}",
                        extension,
                        allowed.join(", ")
                    )
                })
            }
            ValidationError::UnsupportedMimeType {
                content_type,
                allowed,
            } => AppError::UnsupportedMimeType(format!(
                "Content type '{}' is not allowed. Allowed: {}",
                content_type,
                allowed.join(", ")
            )),
            ValidationError::FileTooLarge { size, max } => AppError::FileTooLarge { size, max },
            ValidationError::UnrecognizedImageContent(msg) => {
                AppError::UnrecognizedImageContent(msg)
            }
            ValidationError::Io(e) => AppError::Internal(format!("Upload stream error: {}", e)),
        }
    }
}

/// An upload that passed every check. Only [`ImageValidator::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedImage {
    sanitized_filename: String,
    extension: String,
    format: ImageFormat,
    size: u64,
}

impl ValidatedImage {
    pub fn sanitized_filename(&self) -> &str {
        &self.sanitized_filename
    }

    /// Lower-cased, allow-listed extension from the client filename.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Format established from the file's magic bytes.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content type to store the object with, taken from the sniffed format.
    pub fn content_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Runs the validation steps in order: sanitize, allow-lists, size, content.
///
/// The first failing step wins. The size check only seeks, so oversized input is
/// rejected without reading any of it.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    limits: UploadLimits,
}

impl ImageValidator {
    pub fn new(limits: UploadLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    pub fn validate<R: Read + Seek>(
        &self,
        stream: &mut R,
        filename: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<ValidatedImage, ValidationError> {
        let sanitized_filename = sanitize_filename(filename.unwrap_or(""))?;
        tracing::debug!(stage = "sanitized", filename = %sanitized_filename, "Filename sanitized");

        let extension = check_extension(&sanitized_filename, &self.limits.allowed_extensions)?;
        check_content_type(content_type, &self.limits.allowed_content_types)?;
        tracing::debug!(stage = "allowlist_checked", extension = %extension, "Declared metadata allowed");

        let size = self.check_size(stream)?;
        tracing::debug!(stage = "size_checked", size_bytes = size, "Size within limit");

        let format = self.check_content(stream, &sanitized_filename)?;
        tracing::debug!(stage = "content_sniffed", format = %format, "Image format detected");

        Ok(ValidatedImage {
            sanitized_filename,
            extension,
            format,
            size,
        })
    }

    fn check_size<S: Seek>(&self, stream: &mut S) -> Result<u64, ValidationError> {
        let size = measure_len(stream)?;
        if size > self.limits.max_size_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.limits.max_size_bytes,
            });
        }
        Ok(size)
    }

    fn check_content<R: Read + Seek>(
        &self,
        stream: &mut R,
        filename: &str,
    ) -> Result<ImageFormat, ValidationError> {
        let header = read_header(stream, SNIFF_WINDOW_BYTES)?;

        let format = sniff_format(&header).ok_or_else(|| {
            ValidationError::UnrecognizedImageContent(format!(
                "'{}' is not a PNG, JPEG, GIF, or WEBP image",
                filename
            ))
        })?;

        if !self.limits.allowed_formats.contains(&format) {
            return Err(ValidationError::UnrecognizedImageContent(format!(
                "'{}' is a {} image, which is not accepted",
                filename, format
            )));
        }

        Ok(format)
    }
}
