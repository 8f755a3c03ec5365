/// Like database operations
///
/// Likes are keyed by (target, liked_by): toggling is per user, so two
/// toggles always return to the un-liked state for that user without
/// touching anyone else's like.
use crate::error::Result;
use crate::models::{Like, LikedVideo, VideoCard};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const LIKE_COLUMNS: &str = "id, video_id, comment_id, tweet_id, liked_by, created_at";

/// The target column a like points at.
#[derive(Debug, Clone, Copy)]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    fn column(self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video_id",
            LikeTarget::Comment(_) => "comment_id",
            LikeTarget::Tweet(_) => "tweet_id",
        }
    }

    fn id(self) -> Uuid {
        match self {
            LikeTarget::Video(id) | LikeTarget::Comment(id) | LikeTarget::Tweet(id) => id,
        }
    }
}

/// Toggle a like. Returns `Some(like)` if the target is now liked by the
/// user, `None` if the existing like was removed.
pub async fn toggle(pool: &PgPool, target: LikeTarget, liked_by: Uuid) -> Result<Option<Like>> {
    // Column name comes from the enum above, never from user input.
    let deleted = sqlx::query(&format!(
        "DELETE FROM likes WHERE {} = $1 AND liked_by = $2",
        target.column()
    ))
    .bind(target.id())
    .bind(liked_by)
    .execute(pool)
    .await?;

    if deleted.rows_affected() > 0 {
        return Ok(None);
    }

    let like = sqlx::query_as::<_, Like>(&format!(
        r#"
        INSERT INTO likes ({}, liked_by)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        RETURNING {LIKE_COLUMNS}
        "#,
        target.column()
    ))
    .bind(target.id())
    .bind(liked_by)
    .fetch_optional(pool)
    .await?;

    Ok(like)
}

#[derive(sqlx::FromRow)]
struct LikedVideoRow {
    like_id: Uuid,
    liked_by: Uuid,
    video_id: Uuid,
    title: String,
    description: String,
    thumbnail_url: String,
    video_url: String,
    views: i64,
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
}

/// Videos liked by a user, with their video projections, newest like
/// first.
pub async fn liked_videos(pool: &PgPool, liked_by: Uuid) -> Result<Vec<LikedVideo>> {
    let rows = sqlx::query_as::<_, LikedVideoRow>(
        r#"
        SELECT
            l.id AS like_id, l.liked_by, l.created_at,
            v.id AS video_id, v.title, v.description, v.thumbnail_url, v.video_url, v.views
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        WHERE l.liked_by = $1 AND l.video_id IS NOT NULL
        ORDER BY l.created_at DESC
        "#,
    )
    .bind(liked_by)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| LikedVideo {
            like_id: row.like_id,
            liked_by: row.liked_by,
            video: VideoCard {
                id: row.video_id,
                title: row.title,
                description: row.description,
                thumbnail_url: row.thumbnail_url,
                video_url: row.video_url,
                views: row.views,
            },
        })
        .collect())
}
