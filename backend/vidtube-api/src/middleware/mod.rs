/// HTTP middleware and request extractors
pub mod jwt_auth;

pub use jwt_auth::{JwtAuthMiddleware, MaybeUserId, UserId};
