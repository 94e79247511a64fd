//! Chirp Processing Library
//!
//! Validation of untrusted image uploads. Every check here is synchronous and works on
//! any `Read + Seek` source, so it can run against in-memory buffers in tests and
//! against buffered multipart bodies in the API.

pub mod allowlist;
pub mod filename;
pub mod keys;
pub mod sniff;
pub mod stream;
pub mod validator;

pub use filename::sanitize_filename;
pub use keys::generate_storage_key;
pub use sniff::sniff_format;
pub use stream::{measure_len, read_header, RewindGuard};
pub use validator::{ImageValidator, ValidatedImage, ValidationError};
