//! Data models for the application
//!
//! Only the image-attachment domain lives here: the association between an uploaded
//! image and the entity that owns it, the recognised image formats and the persisted
//! image record. Tweets, comments and users are owned by the surrounding data layer.

mod association;
mod format;
mod image;

pub use association::*;
pub use format::*;
pub use image::*;
