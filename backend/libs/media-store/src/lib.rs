/// S3-backed media store shared across VidTube services
///
/// Handles uploads of user images and video assets to an S3-compatible
/// bucket and returns the public URL stored on the owning record.
pub mod config;
pub mod operations;

pub use config::MediaStoreConfig;
pub use operations::MediaStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("upload failed for key '{key}': {message}")]
    Upload { key: String, message: String },

    #[error("delete failed for key '{key}': {message}")]
    Delete { key: String, message: String },
}

pub type Result<T> = std::result::Result<T, MediaStoreError>;
