/// Playlist database operations
///
/// Videos keep their insertion order through an explicit position column;
/// adds append at the end, duplicates are ignored.
use crate::error::Result;
use crate::models::{Playlist, VideoCard};
use sqlx::PgPool;
use uuid::Uuid;

const PLAYLIST_COLUMNS: &str = "id, owner_id, name, description, created_at, updated_at";

pub async fn create_playlist(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist> {
    let playlist = sqlx::query_as::<_, Playlist>(&format!(
        r#"
        INSERT INTO playlists (owner_id, name, description)
        VALUES ($1, $2, $3)
        RETURNING {PLAYLIST_COLUMNS}
        "#,
    ))
    .bind(owner_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(playlist)
}

pub async fn find_by_id(pool: &PgPool, playlist_id: Uuid) -> Result<Option<Playlist>> {
    let playlist = sqlx::query_as::<_, Playlist>(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = $1"
    ))
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Playlist>> {
    let playlists = sqlx::query_as::<_, Playlist>(&format!(
        r#"
        SELECT {PLAYLIST_COLUMNS} FROM playlists
        WHERE owner_id = $1
        ORDER BY created_at DESC
        "#,
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(playlists)
}

pub async fn update_playlist(
    pool: &PgPool,
    playlist_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Option<Playlist>> {
    let playlist = sqlx::query_as::<_, Playlist>(&format!(
        r#"
        UPDATE playlists SET name = $1, description = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING {PLAYLIST_COLUMNS}
        "#,
    ))
    .bind(name)
    .bind(description)
    .bind(playlist_id)
    .fetch_optional(pool)
    .await?;

    Ok(playlist)
}

pub async fn delete_playlist(pool: &PgPool, playlist_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(playlist_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Append a video at the end of the playlist. Returns false if it was
/// already there.
pub async fn add_video(pool: &PgPool, playlist_id: Uuid, video_id: Uuid) -> Result<bool> {
    let inserted = sqlx::query_as::<_, (Uuid,)>(
        r#"
        INSERT INTO playlist_videos (playlist_id, video_id, position)
        SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
        FROM playlist_videos WHERE playlist_id = $1
        ON CONFLICT (playlist_id, video_id) DO NOTHING
        RETURNING video_id
        "#,
    )
    .bind(playlist_id)
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(inserted.is_some())
}

pub async fn remove_video(pool: &PgPool, playlist_id: Uuid, video_id: Uuid) -> Result<bool> {
    let result =
        sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2")
            .bind(playlist_id)
            .bind(video_id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

/// Videos in playlist order.
pub async fn videos_for_playlist(pool: &PgPool, playlist_id: Uuid) -> Result<Vec<VideoCard>> {
    let videos = sqlx::query_as::<_, VideoCard>(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail_url, v.video_url, v.views
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        WHERE pv.playlist_id = $1
        ORDER BY pv.position ASC
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(videos)
}
