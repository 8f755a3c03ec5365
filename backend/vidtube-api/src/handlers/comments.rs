/// Comment handlers
use crate::db::{comment_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::PaginationParams;
use crate::response::ApiResponse;
use crate::validators::require_non_empty;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Paginated comments for a video, each with its owner projection.
pub async fn get_video_comments(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    if video_repo::find_by_id(&pool, *video_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Video with this id does not exist".to_string(),
        ));
    }

    let comments =
        comment_repo::list_for_video(&pool, *video_id, query.limit(), query.offset()).await?;

    Ok(ApiResponse::ok(
        comments,
        "Comments to the requested video fetched",
    ))
}

#[derive(Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

pub async fn add_comment(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    user: UserId,
    req: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("content", &req.content)])?;

    let video = video_repo::find_by_id(&pool, *video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    let comment = comment_repo::create_comment(&pool, video.id, user.0, &req.content).await?;

    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

#[derive(Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

pub async fn update_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user: UserId,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("content", &req.content)])?;

    let existing = comment_repo::find_by_id(&pool, *comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "Only the owner who created the comment can update it".to_string(),
        ));
    }

    let updated = comment_repo::update_content(&pool, *comment_id, &req.content)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment with this id does not exist".to_string()))?;

    Ok(ApiResponse::ok(updated, "Comment updated successfully"))
}

pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    let existing = comment_repo::find_by_id(&pool, *comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "Only the owner who created the comment can delete it".to_string(),
        ));
    }

    comment_repo::delete_comment(&pool, *comment_id).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Comment deleted successfully",
    ))
}
