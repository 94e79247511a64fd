//! Chirp Storage Library
//!
//! Object storage for uploaded images. The [`Storage`] trait is the only thing the
//! upload pipeline sees; [`S3Storage`] implements it over `object_store`.
//!
//! # Storage key format
//!
//! Keys are flat, `<32 hex chars>.<extension>`, generated by `chirp-processing`. They
//! must not be empty, contain `..` or start with `/`.

pub mod factory;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use s3::S3Storage;
pub use traits::{validate_key, Storage, StorageError, StorageResult};
