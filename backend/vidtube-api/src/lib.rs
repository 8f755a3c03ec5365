/// VidTube API Library
///
/// REST backend for the VidTube platform: users and channels, videos,
/// comments, tweets, likes, playlists and subscriptions.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers, one module per resource
/// - `models`: Record and projection types
/// - `db`: Database access layer, one repository per resource
/// - `middleware`: JWT authentication middleware and extractors
/// - `services`: Multipart/media upload glue
/// - `response`: The uniform success envelope
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};
pub use response::ApiResponse;
