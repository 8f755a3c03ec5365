/// Like handlers: per-user toggles for videos, comments and tweets
use crate::db::like_repo::{self, LikeTarget};
use crate::db::{comment_repo, tweet_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::response::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn toggle_video_like(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    if video_repo::find_by_id(&pool, *video_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Video with this id does not exist".to_string(),
        ));
    }

    match like_repo::toggle(&pool, LikeTarget::Video(*video_id), user.0).await? {
        Some(like) => Ok(ApiResponse::ok(like, "Video liked successfully")),
        None => Ok(ApiResponse::ok(
            serde_json::json!({}),
            "Video disliked successfully",
        )),
    }
}

pub async fn toggle_comment_like(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    if comment_repo::find_by_id(&pool, *comment_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Comment with this id does not exist".to_string(),
        ));
    }

    match like_repo::toggle(&pool, LikeTarget::Comment(*comment_id), user.0).await? {
        Some(like) => Ok(ApiResponse::ok(like, "Comment liked successfully")),
        None => Ok(ApiResponse::ok(
            serde_json::json!({}),
            "Comment disliked successfully",
        )),
    }
}

pub async fn toggle_tweet_like(
    pool: web::Data<PgPool>,
    tweet_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    if tweet_repo::find_by_id(&pool, *tweet_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Tweet with this id does not exist".to_string(),
        ));
    }

    match like_repo::toggle(&pool, LikeTarget::Tweet(*tweet_id), user.0).await? {
        Some(like) => Ok(ApiResponse::ok(like, "Tweet liked successfully")),
        None => Ok(ApiResponse::ok(
            serde_json::json!({}),
            "Tweet disliked successfully",
        )),
    }
}

pub async fn get_liked_videos(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let liked = like_repo::liked_videos(&pool, user.0).await?;

    Ok(ApiResponse::ok(liked, "Liked videos fetched successfully"))
}
