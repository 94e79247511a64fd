//! Database repositories for data access layer
//
// Image record contract and its Postgres implementation
pub mod image;
//
// In-memory record store used by tests and local runs without a database
pub mod memory;

pub use image::{ImageRecordStore, ImageRepository};
pub use memory::InMemoryImageRecords;
