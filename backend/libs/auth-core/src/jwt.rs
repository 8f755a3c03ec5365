/// JWT token generation and validation
///
/// The service issues and validates its own tokens, signed with HS256 using
/// two independent secrets: one for short-lived access tokens and one for
/// long-lived refresh tokens. Keys are loaded once at startup and immutable
/// thereafter.
///
/// Services must call `initialize_keys()` during startup before any token
/// operation:
///
/// ```rust
/// auth_core::jwt::initialize_keys("access-secret", "refresh-secret")
///     .expect("failed to initialize JWT keys");
/// ```
use crate::{AuthError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 24;
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 10;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// Claims carried by both token kinds; `email` and `username` are empty for
/// refresh tokens, which identify the user by `sub` alone.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

/// Access/refresh token pair issued at login and on refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct KeySet {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

static ACCESS_KEYS: OnceCell<KeySet> = OnceCell::new();
static REFRESH_KEYS: OnceCell<KeySet> = OnceCell::new();

/// Initialize both signing secrets. Must be called once at startup.
pub fn initialize_keys(access_secret: &str, refresh_secret: &str) -> Result<()> {
    ACCESS_KEYS
        .set(KeySet {
            encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            decoding: DecodingKey::from_secret(access_secret.as_bytes()),
        })
        .map_err(|_| AuthError::AlreadyInitialized)?;

    REFRESH_KEYS
        .set(KeySet {
            encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        })
        .map_err(|_| AuthError::AlreadyInitialized)?;

    Ok(())
}

/// Generate a short-lived access token carrying identity claims.
pub fn generate_access_token(user_id: Uuid, email: &str, username: &str) -> Result<String> {
    let keys = ACCESS_KEYS.get().ok_or(AuthError::NotInitialized)?;
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS)).timestamp(),
        token_type: TOKEN_TYPE_ACCESS.to_string(),
        email: email.to_string(),
        username: username.to_string(),
    };

    Ok(encode(
        &Header::new(JWT_ALGORITHM),
        &claims,
        &keys.encoding,
    )?)
}

/// Generate a long-lived refresh token carrying only the user id.
pub fn generate_refresh_token(user_id: Uuid) -> Result<String> {
    let keys = REFRESH_KEYS.get().ok_or(AuthError::NotInitialized)?;
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS)).timestamp(),
        token_type: TOKEN_TYPE_REFRESH.to_string(),
        email: String::new(),
        username: String::new(),
    };

    Ok(encode(
        &Header::new(JWT_ALGORITHM),
        &claims,
        &keys.encoding,
    )?)
}

/// Generate a matching access/refresh pair.
pub fn generate_token_pair(user_id: Uuid, email: &str, username: &str) -> Result<TokenPair> {
    Ok(TokenPair {
        access_token: generate_access_token(user_id, email, username)?,
        refresh_token: generate_refresh_token(user_id)?,
    })
}

/// Validate an access token and return its claims.
pub fn validate_access_token(token: &str) -> Result<Claims> {
    let keys = ACCESS_KEYS.get().ok_or(AuthError::NotInitialized)?;
    let data = decode::<Claims>(token, &keys.decoding, &Validation::new(JWT_ALGORITHM))?;

    if data.claims.token_type != TOKEN_TYPE_ACCESS {
        return Err(AuthError::WrongTokenType {
            expected: TOKEN_TYPE_ACCESS.to_string(),
            actual: data.claims.token_type,
        });
    }

    Ok(data.claims)
}

/// Validate a refresh token and return its claims.
pub fn validate_refresh_token(token: &str) -> Result<Claims> {
    let keys = REFRESH_KEYS.get().ok_or(AuthError::NotInitialized)?;
    let data = decode::<Claims>(token, &keys.decoding, &Validation::new(JWT_ALGORITHM))?;

    if data.claims.token_type != TOKEN_TYPE_REFRESH {
        return Err(AuthError::WrongTokenType {
            expected: TOKEN_TYPE_REFRESH.to_string(),
            actual: data.claims.token_type,
        });
    }

    Ok(data.claims)
}
