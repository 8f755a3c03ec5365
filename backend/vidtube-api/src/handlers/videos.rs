/// Video handlers: publishing, fetching, listing and owner-only mutation
use crate::db::{user_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::{MaybeUserId, UserId};
use crate::response::ApiResponse;
use crate::services::media;
use crate::validators::require_non_empty;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Publish a video: multipart form with title/description plus the
/// videoFile and thumbnail files.
pub async fn publish_video(
    pool: web::Data<PgPool>,
    store: web::Data<media_store::MediaStore>,
    user: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = media::collect_form(payload).await?;

    let title = form.text("title").unwrap_or_default().to_string();
    let description = form.text("description").unwrap_or_default().to_string();
    require_non_empty(&[("title", &title), ("description", &description)])?;

    let video_file = form.file("videoFile").ok_or_else(|| {
        AppError::BadRequest("Please upload both thumbnail and video files".to_string())
    })?;
    let thumbnail = form.file("thumbnail").ok_or_else(|| {
        AppError::BadRequest("Please upload both thumbnail and video files".to_string())
    })?;

    let duration_secs = form
        .text("duration")
        .and_then(|d| d.parse().ok())
        .unwrap_or(0.0);

    let video_url = media::store_file(&store, video_file, "videos").await?;
    let thumbnail_url = media::store_file(&store, thumbnail, "thumbnails").await?;

    let video = video_repo::create_video(
        &pool,
        user.0,
        &video_url,
        &thumbnail_url,
        &title,
        &description,
        duration_secs,
    )
    .await?;

    Ok(ApiResponse::created(video, "Video registered successfully"))
}

/// Public fetch; bumps the view counter and, for an authenticated viewer,
/// appends a watch-history entry.
pub async fn get_video(
    pool: web::Data<PgPool>,
    video_id: web::Path<Uuid>,
    viewer: MaybeUserId,
) -> Result<HttpResponse> {
    let video = video_repo::find_and_increment_views(&pool, *video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    if let Some(viewer_id) = viewer.0 {
        if let Err(err) = user_repo::record_watch(&pool, viewer_id, video.id).await {
            tracing::warn!(video_id = %video.id, "failed to record watch history: {}", err);
        }
    }

    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVideosQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Published-video listing with text search, sorting and pagination.
pub async fn list_videos(
    pool: web::Data<PgPool>,
    query: web::Query<ListVideosQuery>,
) -> Result<HttpResponse> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);

    let videos = video_repo::list(
        &pool,
        &video_repo::VideoListQuery {
            text: query.query.clone().filter(|q| !q.trim().is_empty()),
            owner_id: query.user_id,
            sort_by: query.sort_by.clone(),
            ascending: query.sort_type.as_deref() == Some("asc"),
            limit,
            offset: (page - 1) * limit,
        },
    )
    .await?;

    Ok(ApiResponse::ok(videos, "Videos fetched successfully"))
}

/// Owner-only update of title/description with an optional new thumbnail.
pub async fn update_video(
    pool: web::Data<PgPool>,
    store: web::Data<media_store::MediaStore>,
    user: UserId,
    video_id: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let existing = video_repo::find_by_id(&pool, *video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You cannot modify a video created by another user".to_string(),
        ));
    }

    let form = media::collect_form(payload).await?;

    let title = form.text("title").unwrap_or(&existing.title).to_string();
    let description = form
        .text("description")
        .unwrap_or(&existing.description)
        .to_string();
    require_non_empty(&[("title", &title), ("description", &description)])?;

    let thumbnail_url = match form.file("thumbnail") {
        Some(thumbnail) => Some(media::store_file(&store, thumbnail, "thumbnails").await?),
        None => None,
    };

    let replaced_thumbnail = thumbnail_url.is_some();
    let updated = video_repo::update_details(
        &pool,
        *video_id,
        &title,
        &description,
        thumbnail_url.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    if replaced_thumbnail {
        media::discard_url(&store, &existing.thumbnail_url).await;
    }

    Ok(ApiResponse::ok(
        updated,
        "Video details updated successfully",
    ))
}

pub async fn delete_video(
    pool: web::Data<PgPool>,
    store: web::Data<media_store::MediaStore>,
    user: UserId,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let existing = video_repo::find_by_id(&pool, *video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You cannot delete a video created by another user".to_string(),
        ));
    }

    video_repo::delete_video(&pool, *video_id).await?;

    media::discard_url(&store, &existing.video_url).await;
    media::discard_url(&store, &existing.thumbnail_url).await;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Video deleted successfully",
    ))
}

pub async fn toggle_publish_status(
    pool: web::Data<PgPool>,
    user: UserId,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let existing = video_repo::find_by_id(&pool, *video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    if existing.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You cannot modify a video created by another user".to_string(),
        ));
    }

    let video = video_repo::toggle_publish(&pool, *video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Video with this id does not exist".to_string()))?;

    let message = if video.is_published {
        "Video published"
    } else {
        "Video unpublished"
    };
    Ok(ApiResponse::ok(video, message))
}
