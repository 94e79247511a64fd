//! Configuration module
//!
//! Server, database, storage, and upload settings are read from the environment
//! (with `.env` support) once at startup and validated before anything is bound.

use std::env;

use crate::constants::{
    DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_ALLOWED_IMAGE_FORMATS,
    DEFAULT_MAX_UPLOAD_SIZE_BYTES, DEFAULT_S3_REGION,
};
use crate::models::ImageFormat;

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 5000;
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub environment: String,
    pub log_format: Option<String>,
}

/// Object storage settings
#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Upload size ceiling and allow-lists handed to the validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    pub allowed_formats: Vec<ImageFormat>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
            allowed_extensions: split_list(DEFAULT_ALLOWED_EXTENSIONS),
            allowed_content_types: split_list(DEFAULT_ALLOWED_CONTENT_TYPES),
            allowed_formats: ImageFormat::ALL.to_vec(),
        }
    }
}

impl UploadLimits {
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub database_url: String,
    pub storage: StorageSettings,
    pub upload: UploadLimits,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins_str = var("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: match var("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => DEFAULT_PORT,
            },
            cors_origins,
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: var("DB_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: var("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set"))?,
            environment,
            log_format: var("LOG_FORMAT"),
        };

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let database_url = match database_url.strip_prefix("postgres://") {
            Some(rest) => format!("postgresql://{}", rest),
            None => database_url,
        };

        let storage = StorageSettings {
            bucket: var("S3_BUCKET").ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set"))?,
            region: var("S3_REGION")
                .or_else(|| var("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
            endpoint: var("S3_ENDPOINT").filter(|s| !s.trim().is_empty()),
            access_key_id: var("S3_KEY").or_else(|| var("AWS_ACCESS_KEY_ID")),
            secret_access_key: var("S3_SECRET").or_else(|| var("AWS_SECRET_ACCESS_KEY")),
        };

        let max_size_bytes = match var("MAX_UPLOAD_SIZE_BYTES") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES must be a valid number"))?,
            None => DEFAULT_MAX_UPLOAD_SIZE_BYTES,
        };

        let allowed_formats = split_list(
            &var("ALLOWED_IMAGE_FORMATS").unwrap_or_else(|| DEFAULT_ALLOWED_IMAGE_FORMATS.into()),
        )
        .iter()
        .map(|s| s.parse::<ImageFormat>())
        .collect::<Result<Vec<_>, _>>()?;

        let upload = UploadLimits {
            max_size_bytes,
            allowed_extensions: split_list(
                &var("ALLOWED_EXTENSIONS").unwrap_or_else(|| DEFAULT_ALLOWED_EXTENSIONS.into()),
            ),
            allowed_content_types: split_list(
                &var("ALLOWED_CONTENT_TYPES")
                    .unwrap_or_else(|| DEFAULT_ALLOWED_CONTENT_TYPES.into()),
            ),
            allowed_formats,
        };

        let config = Config {
            base,
            database_url,
            storage,
            upload,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        if self.is_production() && self.base.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long in production"
            ));
        }

        if !self.database_url.starts_with("postgresql://") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.storage.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }

        if self.upload.max_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES must be greater than zero"));
        }

        if self.upload.allowed_extensions.is_empty()
            || self.upload.allowed_content_types.is_empty()
            || self.upload.allowed_formats.is_empty()
        {
            return Err(anyhow::anyhow!("Upload allow-lists must not be empty"));
        }

        Ok(())
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.base.db_timeout_seconds
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> Option<&str> {
        self.base.log_format.as_deref()
    }

    pub fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    pub fn upload_limits(&self) -> &UploadLimits {
        &self.upload
    }

    pub fn max_upload_size_bytes(&self) -> u64 {
        self.upload.max_size_bytes
    }
}

fn is_production_env(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
