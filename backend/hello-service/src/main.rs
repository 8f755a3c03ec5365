/// Hello Service - minimal HTTP server
///
/// The smallest possible service: two GET routes and a port from the
/// environment. Useful as a deployment smoke test.
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use std::io;

async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Hello World")
}

async fn login() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<h1>Please Login</h1>")
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(hello))
        .route("/login", web::get().to(login));
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!(port, "hello-service starting");

    HttpServer::new(|| App::new().wrap(Logger::default()).configure(configure))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test};

    #[actix_web::test]
    async fn root_says_hello() {
        let app = test::init_service(App::new().configure(configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(resp.status().is_success());
        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"Hello World");
    }

    #[actix_web::test]
    async fn login_serves_html() {
        let app = test::init_service(App::new().configure(configure)).await;
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;

        assert!(resp.status().is_success());
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = to_bytes(resp.into_body()).await.unwrap();
        assert_eq!(&body[..], b"<h1>Please Login</h1>");
    }

    #[actix_web::test]
    async fn unknown_route_is_404() {
        let app = test::init_service(App::new().configure(configure)).await;
        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
