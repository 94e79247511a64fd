pub mod health;
pub mod image_delete;
pub mod image_upload;
