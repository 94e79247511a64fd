//! Shared constants

/// Default maximum upload size: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of leading bytes inspected when sniffing the real image format.
pub const SNIFF_WINDOW_BYTES: usize = 512;

/// Maximum length of a sanitized filename.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Extra room allowed on top of the upload limit for multipart framing and form fields.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const DEFAULT_ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,gif,webp";
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &str = "image/png,image/jpeg,image/gif,image/webp";
pub const DEFAULT_ALLOWED_IMAGE_FORMATS: &str = "png,jpeg,gif,webp";

/// Region used when neither `S3_REGION` nor `AWS_REGION` is set.
pub const DEFAULT_S3_REGION: &str = "us-west-2";

/// API path prefix
pub const API_PREFIX: &str = "/api";
