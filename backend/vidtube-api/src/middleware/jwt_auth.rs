/// JWT authentication middleware and extractors
///
/// The access token is taken from the `accessToken` cookie or the
/// `Authorization: Bearer` header. Protected scopes wrap
/// `JwtAuthMiddleware`; handlers receive the authenticated user through
/// the `UserId` extractor. Public routes that behave differently for a
/// logged-in viewer use `MaybeUserId`, which validates the token when one
/// is present and never fails the request.
use crate::error::AppError;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use uuid::Uuid;

/// User ID extracted from a validated JWT
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

/// Optional viewer identity for public routes
#[derive(Debug, Clone, Copy)]
pub struct MaybeUserId(pub Option<Uuid>);

const ACCESS_TOKEN_COOKIE: &str = "accessToken";

fn bearer_or_cookie_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

// Failures surface as `AppError::Unauthorized` so the 401 body keeps the
// uniform error envelope.
fn validate_request_token(req: &HttpRequest) -> Result<Uuid, Error> {
    let token = bearer_or_cookie_token(req)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized request".to_string()))?;

    let claims = auth_core::jwt::validate_access_token(&token).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        AppError::Unauthorized("Invalid access token".to_string())
    })?;

    Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("malformed user id in token subject: {}", e);
        AppError::Unauthorized("Invalid access token".to_string()).into()
    })
}

/// JWT Authentication Middleware
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            // Short-circuit with a rendered response rather than `Err` so the
            // 401 envelope survives `actix_web::test::call_service`, which
            // unwraps service-level errors before the dispatcher converts them.
            let user_id = match validate_request_token(req.request()) {
                Ok(user_id) => user_id,
                Err(err) => {
                    return Ok(req
                        .into_response(HttpResponse::from_error(err))
                        .map_into_right_body());
                }
            };
            req.extensions_mut().insert(UserId(user_id));

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}

impl actix_web::FromRequest for UserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        // Middleware-populated extension first; otherwise the route is not
        // wrapped and the extractor validates the token itself.
        if let Some(user_id) = req.extensions().get::<UserId>() {
            return ready(Ok(*user_id));
        }

        ready(validate_request_token(req).map(UserId))
    }
}

impl actix_web::FromRequest for MaybeUserId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(user_id) = req.extensions().get::<UserId>() {
            return ready(Ok(MaybeUserId(Some(user_id.0))));
        }

        ready(Ok(MaybeUserId(validate_request_token(req).ok())))
    }
}
