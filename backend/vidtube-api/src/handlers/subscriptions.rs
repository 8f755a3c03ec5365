/// Subscription handlers
use crate::db::{subscription_repo, user_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::response::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn toggle_subscription(
    pool: web::Data<PgPool>,
    channel_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    if *channel_id == user.0 {
        return Err(AppError::BadRequest(
            "You cannot subscribe to your own channel".to_string(),
        ));
    }

    if user_repo::find_public_by_id(&pool, *channel_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(
            "Channel does not exist".to_string(),
        ));
    }

    match subscription_repo::toggle(&pool, user.0, *channel_id).await? {
        Some(subscription) => Ok(ApiResponse::ok(
            subscription,
            "Channel subscribed successfully",
        )),
        None => Ok(ApiResponse::ok(
            serde_json::json!({}),
            "Channel unsubscribed successfully",
        )),
    }
}

pub async fn get_channel_subscribers(
    pool: web::Data<PgPool>,
    channel_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let subscribers = subscription_repo::channel_subscribers(&pool, *channel_id).await?;

    Ok(ApiResponse::ok(
        subscribers,
        "Channel subscribers fetched successfully",
    ))
}

pub async fn get_subscribed_channels(
    pool: web::Data<PgPool>,
    subscriber_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let channels = subscription_repo::subscribed_channels(&pool, *subscriber_id).await?;

    Ok(ApiResponse::ok(
        channels,
        "Subscribed channels fetched successfully",
    ))
}
