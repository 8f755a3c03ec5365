/// User database operations: accounts, credentials, channel profile and
/// watch history.
use crate::error::Result;
use crate::models::{ChannelProfile, OwnerInfo, User, UserPublic, VideoCard, WatchHistoryEntry};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
     password_hash, refresh_token, created_at, updated_at";

const PUBLIC_COLUMNS: &str =
    "id, username, email, full_name, avatar_url, cover_image_url, created_at";

pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    full_name: &str,
    avatar_url: &str,
    cover_image_url: Option<&str>,
    password_hash: &str,
) -> Result<UserPublic> {
    let user = sqlx::query_as::<_, UserPublic>(&format!(
        r#"
        INSERT INTO users (username, email, full_name, avatar_url, cover_image_url, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {PUBLIC_COLUMNS}
        "#,
    ))
    .bind(username)
    .bind(email)
    .bind(full_name)
    .bind(avatar_url)
    .bind(cover_image_url)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_public_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserPublic>> {
    let user = sqlx::query_as::<_, UserPublic>(&format!(
        "SELECT {PUBLIC_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user =
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(pool)
            .await?;

    Ok(user)
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Login supports either identifier in a single lookup.
pub async fn find_by_email_or_username(pool: &PgPool, identifier: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR username = $1"
    ))
    .bind(identifier)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Store or clear the persisted refresh token (cleared on logout).
pub async fn set_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    refresh_token: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE users SET refresh_token = $1, updated_at = NOW() WHERE id = $2")
        .bind(refresh_token)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_password(pool: &PgPool, user_id: Uuid, password_hash: &str) -> Result<()> {
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(password_hash)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn update_details(
    pool: &PgPool,
    user_id: Uuid,
    full_name: &str,
    email: &str,
) -> Result<Option<UserPublic>> {
    let user = sqlx::query_as::<_, UserPublic>(&format!(
        r#"
        UPDATE users SET full_name = $1, email = $2, updated_at = NOW()
        WHERE id = $3
        RETURNING {PUBLIC_COLUMNS}
        "#,
    ))
    .bind(full_name)
    .bind(email)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_avatar(
    pool: &PgPool,
    user_id: Uuid,
    avatar_url: &str,
) -> Result<Option<UserPublic>> {
    let user = sqlx::query_as::<_, UserPublic>(&format!(
        r#"
        UPDATE users SET avatar_url = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {PUBLIC_COLUMNS}
        "#,
    ))
    .bind(avatar_url)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn update_cover_image(
    pool: &PgPool,
    user_id: Uuid,
    cover_image_url: &str,
) -> Result<Option<UserPublic>> {
    let user = sqlx::query_as::<_, UserPublic>(&format!(
        r#"
        UPDATE users SET cover_image_url = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {PUBLIC_COLUMNS}
        "#,
    ))
    .bind(cover_image_url)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Channel profile with subscription counters and, when a viewer is known,
/// whether that viewer is subscribed.
pub async fn channel_profile(
    pool: &PgPool,
    username: &str,
    viewer_id: Option<Uuid>,
) -> Result<Option<ChannelProfile>> {
    let profile = sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT
            u.id, u.username, u.email, u.full_name, u.avatar_url, u.cover_image_url,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscriber_count,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS subscribed_to_count,
            EXISTS(
                SELECT 1 FROM subscriptions s
                WHERE s.channel_id = u.id AND s.subscriber_id = $2
            ) AS is_subscribed
        FROM users u
        WHERE u.username = $1
        "#,
    )
    .bind(username)
    .bind(viewer_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

#[derive(sqlx::FromRow)]
struct WatchHistoryRow {
    watched_at: DateTime<Utc>,
    video_id: Uuid,
    title: String,
    description: String,
    thumbnail_url: String,
    video_url: String,
    views: i64,
    owner_id: Uuid,
    owner_username: String,
    owner_full_name: String,
    owner_email: String,
}

/// Watch history entries joined with their videos and video owners,
/// newest first.
pub async fn watch_history(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<WatchHistoryEntry>> {
    let rows = sqlx::query_as::<_, WatchHistoryRow>(
        r#"
        SELECT
            wh.watched_at,
            v.id AS video_id, v.title, v.description, v.thumbnail_url, v.video_url, v.views,
            o.id AS owner_id, o.username AS owner_username,
            o.full_name AS owner_full_name, o.email AS owner_email
        FROM watch_history wh
        JOIN videos v ON v.id = wh.video_id
        JOIN users o ON o.id = v.owner_id
        WHERE wh.user_id = $1
        ORDER BY wh.watched_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| WatchHistoryEntry {
            watched_at: row.watched_at,
            video: VideoCard {
                id: row.video_id,
                title: row.title,
                description: row.description,
                thumbnail_url: row.thumbnail_url,
                video_url: row.video_url,
                views: row.views,
            },
            owner: OwnerInfo {
                id: row.owner_id,
                username: row.owner_username,
                full_name: row.owner_full_name,
                email: row.owner_email,
            },
        })
        .collect())
}

pub async fn record_watch(pool: &PgPool, user_id: Uuid, video_id: Uuid) -> Result<()> {
    sqlx::query("INSERT INTO watch_history (user_id, video_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(())
}
