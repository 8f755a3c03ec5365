/// Comment database operations
use crate::error::Result;
use crate::models::{Comment, CommentWithOwner, OwnerInfo};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, video_id, owner_id, content, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    video_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    owner_id: Uuid,
    owner_username: String,
    owner_full_name: String,
    owner_email: String,
}

/// Comments for a video joined with an owner projection, newest first.
pub async fn list_for_video(
    pool: &PgPool,
    video_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentWithOwner>> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT
            c.id, c.video_id, c.content, c.created_at,
            o.id AS owner_id, o.username AS owner_username,
            o.full_name AS owner_full_name, o.email AS owner_email
        FROM comments c
        JOIN users o ON o.id = c.owner_id
        WHERE c.video_id = $1
        ORDER BY c.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(video_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CommentWithOwner {
            id: row.id,
            video_id: row.video_id,
            content: row.content,
            created_at: row.created_at,
            owner: OwnerInfo {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                email: row.owner_email,
            },
        })
        .collect())
}

pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner_id: Uuid,
    content: &str,
) -> Result<Comment> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
        INSERT INTO comments (video_id, owner_id, content)
        VALUES ($1, $2, $3)
        RETURNING {COMMENT_COLUMNS}
        "#,
    ))
    .bind(video_id)
    .bind(owner_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

pub async fn find_by_id(pool: &PgPool, comment_id: Uuid) -> Result<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

pub async fn update_content(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>(&format!(
        r#"
        UPDATE comments SET content = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {COMMENT_COLUMNS}
        "#,
    ))
    .bind(content)
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
