//! Image upload pipeline orchestration
//!
//! [`UploadService`] drives an upload through
//! `Received → Sanitized → AllowlistChecked → SizeChecked → ContentSniffed → Authorized → Stored → Persisted`
//! and aborts at the first failing step.

mod association;
mod service;
mod stage;

pub use association::{resolve_association, UploadRequest};
pub use service::UploadService;
pub use stage::UploadStage;
