/// User handlers: registration, session lifecycle, profile management,
/// channel profile and watch history.
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::middleware::{MaybeUserId, UserId};
use crate::models::PaginationParams;
use crate::response::ApiResponse;
use crate::services::media;
use crate::validators::{require_non_empty, validate_email};
use actix_multipart::Multipart;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use auth_core::jwt::TokenPair;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

const ACCESS_TOKEN_COOKIE: &str = "accessToken";
const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn auth_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .finish()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").http_only(true).finish();
    cookie.make_removal();
    cookie
}

/// Issue a fresh token pair and persist the refresh token on the user row.
async fn issue_tokens(
    pool: &PgPool,
    user_id: Uuid,
    email: &str,
    username: &str,
) -> Result<TokenPair> {
    let pair = auth_core::jwt::generate_token_pair(user_id, email, username)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    user_repo::set_refresh_token(pool, user_id, Some(&pair.refresh_token)).await?;
    Ok(pair)
}

/// Register a new user: multipart form with username/email/fullname/
/// password plus a required avatar file and an optional cover image.
pub async fn register(
    pool: web::Data<PgPool>,
    store: web::Data<media_store::MediaStore>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = media::collect_form(payload).await?;

    let username = form.text("username").unwrap_or_default().to_lowercase();
    let email = form.text("email").unwrap_or_default().to_string();
    let full_name = form.text("fullname").unwrap_or_default().to_string();
    let password = form.text("password").unwrap_or_default().to_string();

    require_non_empty(&[
        ("username", &username),
        ("email", &email),
        ("fullname", &full_name),
        ("password", &password),
    ])?;
    validate_email(&email)?;

    if user_repo::find_by_email(&pool, &email).await?.is_some() {
        return Err(AppError::Conflict(
            "User with email already exists".to_string(),
        ));
    }
    if user_repo::find_by_username(&pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "User with this username already exists".to_string(),
        ));
    }

    let avatar = form
        .file("avatar")
        .ok_or_else(|| AppError::BadRequest("Avatar file is required".to_string()))?;
    let avatar_url = media::store_file(&store, avatar, "avatars").await?;

    let cover_image_url = match form.file("coverImage") {
        Some(cover) => Some(media::store_file(&store, cover, "covers").await?),
        None => None,
    };

    let password_hash = auth_core::password::hash_password(&password)?;

    let user = user_repo::create_user(
        &pool,
        &username,
        &email,
        &full_name,
        &avatar_url,
        cover_image_url.as_deref(),
        &password_hash,
    )
    .await?;

    Ok(ApiResponse::created(user, "User registered successfully"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: crate::models::UserPublic,
    pub access_token: String,
    pub refresh_token: String,
}

/// Log in with email or username; sets httpOnly token cookies and also
/// returns the pair in the body for non-browser clients.
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    let identifier = req
        .email
        .as_deref()
        .or(req.username.as_deref())
        .unwrap_or_default();

    require_non_empty(&[("username or email", identifier), ("password", &req.password)])?;

    let user = user_repo::find_by_email_or_username(&pool, identifier)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !auth_core::password::verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid user credentials".to_string(),
        ));
    }

    let pair = issue_tokens(&pool, user.id, &user.email, &user.username).await?;

    let body = ApiResponse::new(
        200,
        LoginResponse {
            user: user.into(),
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
        },
        "User logged in successfully",
    );

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(ACCESS_TOKEN_COOKIE, pair.access_token))
        .cookie(auth_cookie(REFRESH_TOKEN_COOKIE, pair.refresh_token))
        .json(body))
}

/// Clear the stored refresh token and expire both cookies.
pub async fn logout(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    user_repo::set_refresh_token(&pool, user.0, None).await?;

    let body = ApiResponse::new(200, serde_json::json!({}), "User logged out successfully");
    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(removal_cookie(REFRESH_TOKEN_COOKIE))
        .json(body))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Rotate the token pair. The refresh token comes from the cookie or the
/// body and must match the one stored for the user.
pub async fn refresh_access_token(
    pool: web::Data<PgPool>,
    http_req: HttpRequest,
    req: Option<web::Json<RefreshRequest>>,
) -> Result<HttpResponse> {
    let incoming = http_req
        .cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .or_else(|| req.and_then(|r| r.into_inner().refresh_token))
        .ok_or_else(|| AppError::Unauthorized("Refresh token is required".to_string()))?;

    let claims = auth_core::jwt::validate_refresh_token(&incoming)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let user = user_repo::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    // Rotation: a token that was already replaced is rejected.
    if user.refresh_token.as_deref() != Some(incoming.as_str()) {
        return Err(AppError::Unauthorized(
            "Refresh token is expired or already used".to_string(),
        ));
    }

    let pair = issue_tokens(&pool, user.id, &user.email, &user.username).await?;

    let body = ApiResponse::new(
        200,
        serde_json::json!({
            "accessToken": pair.access_token,
            "refreshToken": pair.refresh_token,
        }),
        "Access token refreshed",
    );

    Ok(HttpResponse::Ok()
        .cookie(auth_cookie(ACCESS_TOKEN_COOKIE, pair.access_token))
        .cookie(auth_cookie(REFRESH_TOKEN_COOKIE, pair.refresh_token))
        .json(body))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[
        ("oldPassword", &req.old_password),
        ("newPassword", &req.new_password),
    ])?;

    let record = user_repo::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if !auth_core::password::verify_password(&req.old_password, &record.password_hash)? {
        return Err(AppError::BadRequest("Invalid old password".to_string()));
    }

    let new_hash = auth_core::password::hash_password(&req.new_password)?;
    user_repo::update_password(&pool, user.0, &new_hash).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Password changed successfully",
    ))
}

pub async fn current_user(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let record = user_repo::find_public_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    Ok(ApiResponse::ok(record, "Current user fetched successfully"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDetailsRequest {
    pub fullname: String,
    pub email: String,
}

pub async fn update_details(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<UpdateDetailsRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("fullname", &req.fullname), ("email", &req.email)])?;
    validate_email(&req.email)?;

    let updated = user_repo::update_details(&pool, user.0, &req.fullname, &req.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    Ok(ApiResponse::ok(updated, "Account details updated"))
}

/// Replace the avatar with a freshly uploaded image.
pub async fn change_avatar(
    pool: web::Data<PgPool>,
    store: web::Data<media_store::MediaStore>,
    user: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let current = user_repo::find_public_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let form = media::collect_form(payload).await?;
    let avatar = form
        .file("avatar")
        .ok_or_else(|| AppError::BadRequest("Avatar file is required".to_string()))?;

    let avatar_url = media::store_file(&store, avatar, "avatars").await?;
    let updated = user_repo::update_avatar(&pool, user.0, &avatar_url)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    media::discard_url(&store, &current.avatar_url).await;

    Ok(ApiResponse::ok(updated, "Avatar updated successfully"))
}

pub async fn change_cover_image(
    pool: web::Data<PgPool>,
    store: web::Data<media_store::MediaStore>,
    user: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let current = user_repo::find_public_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let form = media::collect_form(payload).await?;
    let cover = form
        .file("coverImage")
        .ok_or_else(|| AppError::BadRequest("Cover image file is required".to_string()))?;

    let cover_url = media::store_file(&store, cover, "covers").await?;
    let updated = user_repo::update_cover_image(&pool, user.0, &cover_url)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    if let Some(old_cover) = current.cover_image_url.as_deref() {
        media::discard_url(&store, old_cover).await;
    }

    Ok(ApiResponse::ok(updated, "Cover image updated successfully"))
}

/// Public channel profile; subscription state is resolved when the viewer
/// sent a valid token.
pub async fn channel_profile(
    pool: web::Data<PgPool>,
    username: web::Path<String>,
    viewer: MaybeUserId,
) -> Result<HttpResponse> {
    let username = username.to_lowercase();
    require_non_empty(&[("username", &username)])?;

    let profile = user_repo::channel_profile(&pool, &username, viewer.0)
        .await?
        .ok_or_else(|| AppError::NotFound("Channel does not exist".to_string()))?;

    Ok(ApiResponse::ok(profile, "Channel profile fetched successfully"))
}

pub async fn watch_history(
    pool: web::Data<PgPool>,
    user: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let history = user_repo::watch_history(&pool, user.0, query.limit(), query.offset()).await?;

    Ok(ApiResponse::ok(
        history,
        "Watch history fetched successfully",
    ))
}
