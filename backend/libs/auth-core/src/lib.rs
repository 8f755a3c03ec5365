/// Shared authentication primitives for VidTube services
///
/// - `jwt`: access/refresh token generation and validation
/// - `password`: Argon2id password hashing and verification
pub mod jwt;
pub mod password;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT keys not initialized")]
    NotInitialized,

    #[error("JWT keys already initialized")]
    AlreadyInitialized,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("wrong token type: expected {expected}, got {actual}")]
    WrongTokenType { expected: String, actual: String },

    #[error("password too weak: {0}")]
    WeakPassword(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;
