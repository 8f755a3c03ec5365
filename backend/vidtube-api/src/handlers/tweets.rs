/// Tweet handlers
use crate::db::tweet_repo;
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::response::ApiResponse;
use crate::validators::require_non_empty;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct CreateTweetRequest {
    pub content: String,
}

pub async fn create_tweet(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreateTweetRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("content", &req.content)])?;

    let tweet = tweet_repo::create_tweet(&pool, user.0, &req.content).await?;

    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

pub async fn get_user_tweets(pool: web::Data<PgPool>, user: UserId) -> Result<HttpResponse> {
    let tweets = tweet_repo::list_for_owner(&pool, user.0).await?;

    Ok(ApiResponse::ok(
        tweets,
        "Tweets fetched associated to the current user",
    ))
}

#[derive(Deserialize)]
pub struct UpdateTweetRequest {
    pub content: String,
}

pub async fn update_tweet(
    pool: web::Data<PgPool>,
    tweet_id: web::Path<Uuid>,
    user: UserId,
    req: web::Json<UpdateTweetRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("content", &req.content)])?;

    let existing = tweet_repo::find_by_id(&pool, *tweet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "Cannot modify a tweet made by another user".to_string(),
        ));
    }

    let updated = tweet_repo::update_content(&pool, *tweet_id, &req.content)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet with this id does not exist".to_string()))?;

    Ok(ApiResponse::ok(updated, "Tweet updated successfully"))
}

pub async fn delete_tweet(
    pool: web::Data<PgPool>,
    tweet_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    let existing = tweet_repo::find_by_id(&pool, *tweet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "Cannot delete a tweet made by another user".to_string(),
        ));
    }

    tweet_repo::delete_tweet(&pool, *tweet_id).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Tweet deleted successfully",
    ))
}
