//! Chirp DB Library
//!
//! Persistence of image records: the link between a stored object and the tweet,
//! comment or user profile that owns it. Tweets, comments and users themselves are
//! managed elsewhere; this crate only reads them to check that an association target
//! exists and, for profile images, to update `users.profile_image`.

pub mod db;

pub use db::{ImageRecordStore, ImageRepository, InMemoryImageRecords};
