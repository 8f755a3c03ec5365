/// HTTP handlers, one module per resource
///
/// Every handler follows the same straight line: validate input, call the
/// repository, branch on the missing/empty case, wrap the result in the
/// success envelope.
pub mod comments;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;

use crate::response::ApiResponse;
use actix_web::HttpResponse;

/// Liveness probe with the standard envelope.
pub async fn healthcheck() -> HttpResponse {
    ApiResponse::ok("OK", "Health check passed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn healthcheck_returns_envelope() {
        let resp = healthcheck().await;
        assert!(resp.status().is_success());

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["data"], "OK");
        assert_eq!(json["success"], true);
    }
}
