//! Chirp image API
//!
//! HTTP surface of the image upload pipeline: bearer-token authentication, the upload and
//! delete handlers, the [`services::upload::UploadService`] orchestrator and the
//! error rendering shared by every handler.

pub mod api_doc;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
