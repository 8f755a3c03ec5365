use actix_web::{test, web, App, HttpResponse};
use std::sync::Once;
use uuid::Uuid;
use vidtube_api::middleware::{JwtAuthMiddleware, MaybeUserId, UserId};

static INIT: Once = Once::new();

fn init_keys() {
    INIT.call_once(|| {
        auth_core::jwt::initialize_keys("test-access-secret", "test-refresh-secret")
            .expect("keys initialize once");
    });
}

async fn whoami(user: UserId) -> HttpResponse {
    HttpResponse::Ok().body(user.0.to_string())
}

async fn viewer(maybe: MaybeUserId) -> HttpResponse {
    match maybe.0 {
        Some(id) => HttpResponse::Ok().body(id.to_string()),
        None => HttpResponse::Ok().body("anonymous"),
    }
}

#[actix_web::test]
async fn protected_scope_rejects_missing_token() {
    init_keys();
    let app = test::init_service(
        App::new().service(
            web::scope("/secure")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/secure/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn unauthorized_body_keeps_error_envelope() {
    init_keys();
    let app = test::init_service(
        App::new().service(
            web::scope("/secure")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/secure/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).expect("401 body should be JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Unauthorized request");
    assert!(json["errors"].as_array().expect("errors array").is_empty());
}

#[actix_web::test]
async fn invalid_token_body_keeps_error_envelope() {
    init_keys();
    let app = test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).expect("401 body should be JSON");
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Invalid access token");
}

#[actix_web::test]
async fn protected_scope_rejects_garbage_token() {
    init_keys();
    let app = test::init_service(
        App::new().service(
            web::scope("/secure")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn protected_scope_passes_valid_bearer_token() {
    init_keys();
    let user_id = Uuid::new_v4();
    let token =
        auth_core::jwt::generate_access_token(user_id, "alice@example.com", "alice").unwrap();

    let app = test::init_service(
        App::new().service(
            web::scope("/secure")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert_eq!(body, user_id.to_string().as_bytes());
}

#[actix_web::test]
async fn user_id_extractor_validates_without_middleware() {
    init_keys();
    let user_id = Uuid::new_v4();
    let token = auth_core::jwt::generate_access_token(user_id, "bob@example.com", "bob").unwrap();

    let app = test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let denied = test::TestRequest::get().uri("/whoami").to_request();
    assert_eq!(test::call_service(&app, denied).await.status(), 401);

    let allowed = test::TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, allowed).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn maybe_user_id_never_rejects() {
    init_keys();
    let app = test::init_service(App::new().route("/viewer", web::get().to(viewer))).await;

    let anonymous = test::TestRequest::get().uri("/viewer").to_request();
    let resp = test::call_service(&app, anonymous).await;
    assert!(resp.status().is_success());
    assert_eq!(test::read_body(resp).await, "anonymous".as_bytes());

    let bad_token = test::TestRequest::get()
        .uri("/viewer")
        .insert_header(("Authorization", "Bearer expired.or.garbage"))
        .to_request();
    let resp = test::call_service(&app, bad_token).await;
    assert!(resp.status().is_success());
    assert_eq!(test::read_body(resp).await, "anonymous".as_bytes());

    let user_id = Uuid::new_v4();
    let token =
        auth_core::jwt::generate_access_token(user_id, "carol@example.com", "carol").unwrap();
    let authed = test::TestRequest::get()
        .uri("/viewer")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, authed).await;
    assert_eq!(test::read_body(resp).await, user_id.to_string().as_bytes());
}

#[actix_web::test]
async fn cookie_token_is_accepted() {
    init_keys();
    let user_id = Uuid::new_v4();
    let token = auth_core::jwt::generate_access_token(user_id, "dan@example.com", "dan").unwrap();

    let app = test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .cookie(actix_web::cookie::Cookie::new("accessToken", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
