/// Playlist handlers
use crate::db::{playlist_repo, video_repo};
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::{Playlist, PlaylistWithVideos};
use crate::response::ApiResponse;
use crate::validators::require_non_empty;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Load a playlist and enforce ownership in one step.
async fn owned_playlist(pool: &PgPool, playlist_id: Uuid, user: UserId) -> Result<Playlist> {
    let playlist = playlist_repo::find_by_id(pool, playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist with this id does not exist".to_string()))?;

    if playlist.owner_id != user.0 {
        return Err(AppError::Forbidden(
            "You cannot modify a playlist created by another user".to_string(),
        ));
    }

    Ok(playlist)
}

#[derive(Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
}

pub async fn create_playlist(
    pool: web::Data<PgPool>,
    user: UserId,
    req: web::Json<CreatePlaylistRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("name", &req.name), ("description", &req.description)])?;

    let playlist = playlist_repo::create_playlist(&pool, user.0, &req.name, &req.description).await?;

    Ok(ApiResponse::created(
        playlist,
        "Playlist created successfully",
    ))
}

pub async fn get_playlist(
    pool: web::Data<PgPool>,
    playlist_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let playlist = playlist_repo::find_by_id(&pool, *playlist_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist with this id does not exist".to_string()))?;

    let videos = playlist_repo::videos_for_playlist(&pool, playlist.id).await?;

    Ok(ApiResponse::ok(
        PlaylistWithVideos { playlist, videos },
        "Playlist fetched successfully",
    ))
}

pub async fn get_user_playlists(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let playlists = playlist_repo::list_for_owner(&pool, *user_id).await?;

    Ok(ApiResponse::ok(playlists, "User playlists fetched"))
}

#[derive(Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: String,
    pub description: String,
}

pub async fn update_playlist(
    pool: web::Data<PgPool>,
    playlist_id: web::Path<Uuid>,
    user: UserId,
    req: web::Json<UpdatePlaylistRequest>,
) -> Result<HttpResponse> {
    require_non_empty(&[("name", &req.name), ("description", &req.description)])?;
    owned_playlist(&pool, *playlist_id, user).await?;

    let updated = playlist_repo::update_playlist(&pool, *playlist_id, &req.name, &req.description)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist with this id does not exist".to_string()))?;

    Ok(ApiResponse::ok(updated, "Playlist updated successfully"))
}

pub async fn delete_playlist(
    pool: web::Data<PgPool>,
    playlist_id: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse> {
    owned_playlist(&pool, *playlist_id, user).await?;
    playlist_repo::delete_playlist(&pool, *playlist_id).await?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Playlist deleted successfully",
    ))
}

pub async fn add_video_to_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: UserId,
) -> Result<HttpResponse> {
    let (video_id, playlist_id) = *path;
    let playlist = owned_playlist(&pool, playlist_id, user).await?;

    if video_repo::find_by_id(&pool, video_id).await?.is_none() {
        return Err(AppError::NotFound(
            "Video with this id does not exist".to_string(),
        ));
    }

    playlist_repo::add_video(&pool, playlist.id, video_id).await?;
    let videos = playlist_repo::videos_for_playlist(&pool, playlist.id).await?;

    Ok(ApiResponse::ok(
        PlaylistWithVideos { playlist, videos },
        "Video added to the playlist successfully",
    ))
}

pub async fn remove_video_from_playlist(
    pool: web::Data<PgPool>,
    path: web::Path<(Uuid, Uuid)>,
    user: UserId,
) -> Result<HttpResponse> {
    let (video_id, playlist_id) = *path;
    let playlist = owned_playlist(&pool, playlist_id, user).await?;

    if !playlist_repo::remove_video(&pool, playlist.id, video_id).await? {
        return Err(AppError::NotFound(
            "Video is not part of this playlist".to_string(),
        ));
    }

    let videos = playlist_repo::videos_for_playlist(&pool, playlist.id).await?;

    Ok(ApiResponse::ok(
        PlaylistWithVideos { playlist, videos },
        "Video removed from the playlist successfully",
    ))
}
