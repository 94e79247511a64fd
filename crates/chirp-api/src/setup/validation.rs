//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use chirp_core::Config;

/// Validate critical configuration values
///
/// Runs the configuration's own checks, then warns about settings that are legal but
/// risky for the current environment.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if !is_production && config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
    }

    let storage = config.storage();
    if let Some(endpoint) = storage.endpoint.as_deref() {
        if is_production && endpoint.starts_with("http://") {
            tracing::warn!(
                endpoint = %endpoint,
                "S3 endpoint uses plain HTTP in production"
            );
        }
    }

    if storage.access_key_id.is_none() || storage.secret_access_key.is_none() {
        tracing::info!("S3 credentials not set explicitly - using the AWS environment");
    }

    let max_mb = config.max_upload_size_bytes() / 1024 / 1024;
    if max_mb > 50 {
        tracing::warn!(
            max_upload_mb = max_mb,
            "MAX_UPLOAD_SIZE_BYTES is very large; every upload is buffered in memory"
        );
    }

    Ok(())
}
