//! Chirp Core Library
//!
//! This crate provides the domain models, error taxonomy and configuration shared by
//! every Chirp component: the validation pipeline, object storage, the image record
//! store and the HTTP API.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageSettings, UploadLimits};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Association, AssociationKind, ImageFormat, ImageRecord, NewImageRecord};
