/// Video database operations
use crate::error::Result;
use crate::models::Video;
use sqlx::PgPool;
use uuid::Uuid;

const VIDEO_COLUMNS: &str = "id, owner_id, video_url, thumbnail_url, title, description, \
     duration_secs, views, is_published, created_at, updated_at";

/// Sort options accepted by the public listing; anything else falls back
/// to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSort {
    CreatedAt,
    Views,
    Duration,
    Title,
}

impl VideoSort {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("views") => VideoSort::Views,
            Some("duration") => VideoSort::Duration,
            Some("title") => VideoSort::Title,
            _ => VideoSort::CreatedAt,
        }
    }

    fn column(self) -> &'static str {
        match self {
            VideoSort::CreatedAt => "created_at",
            VideoSort::Views => "views",
            VideoSort::Duration => "duration_secs",
            VideoSort::Title => "title",
        }
    }
}

/// Listing filters for `GET /all-videos`.
#[derive(Debug, Default)]
pub struct VideoListQuery {
    pub text: Option<String>,
    pub owner_id: Option<Uuid>,
    pub sort_by: Option<String>,
    pub ascending: bool,
    pub limit: i64,
    pub offset: i64,
}

pub async fn create_video(
    pool: &PgPool,
    owner_id: Uuid,
    video_url: &str,
    thumbnail_url: &str,
    title: &str,
    description: &str,
    duration_secs: f64,
) -> Result<Video> {
    let video = sqlx::query_as::<_, Video>(&format!(
        r#"
        INSERT INTO videos (owner_id, video_url, thumbnail_url, title, description, duration_secs)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {VIDEO_COLUMNS}
        "#,
    ))
    .bind(owner_id)
    .bind(video_url)
    .bind(thumbnail_url)
    .bind(title)
    .bind(description)
    .bind(duration_secs)
    .fetch_one(pool)
    .await?;

    Ok(video)
}

pub async fn find_by_id(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>> {
    let video = sqlx::query_as::<_, Video>(&format!(
        "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// Fetch and bump the view counter in one statement.
pub async fn find_and_increment_views(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>> {
    let video = sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos SET views = views + 1
        WHERE id = $1
        RETURNING {VIDEO_COLUMNS}
        "#,
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// Published videos filtered by free text and owner, sorted by a
/// whitelisted column.
pub async fn list(pool: &PgPool, query: &VideoListQuery) -> Result<Vec<Video>> {
    let sort = VideoSort::parse(query.sort_by.as_deref());
    let direction = if query.ascending { "ASC" } else { "DESC" };

    // Sort column comes from the whitelist above, never from user input.
    let sql = format!(
        r#"
        SELECT {VIDEO_COLUMNS}
        FROM videos
        WHERE is_published = TRUE
          AND ($1::uuid IS NULL OR owner_id = $1)
          AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%' OR description ILIKE '%' || $2 || '%')
        ORDER BY {} {}
        LIMIT $3 OFFSET $4
        "#,
        sort.column(),
        direction,
    );

    let videos = sqlx::query_as::<_, Video>(&sql)
        .bind(query.owner_id)
        .bind(query.text.as_deref())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(pool)
        .await?;

    Ok(videos)
}

pub async fn update_details(
    pool: &PgPool,
    video_id: Uuid,
    title: &str,
    description: &str,
    thumbnail_url: Option<&str>,
) -> Result<Option<Video>> {
    let video = sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos
        SET title = $1,
            description = $2,
            thumbnail_url = COALESCE($3, thumbnail_url),
            updated_at = NOW()
        WHERE id = $4
        RETURNING {VIDEO_COLUMNS}
        "#,
    ))
    .bind(title)
    .bind(description)
    .bind(thumbnail_url)
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

/// Deletes the row; likes, comments, playlist references and watch
/// history go with it via cascading foreign keys.
pub async fn delete_video(pool: &PgPool, video_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(video_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn toggle_publish(pool: &PgPool, video_id: Uuid) -> Result<Option<Video>> {
    let video = sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos SET is_published = NOT is_published, updated_at = NOW()
        WHERE id = $1
        RETURNING {VIDEO_COLUMNS}
        "#,
    ))
    .bind(video_id)
    .fetch_optional(pool)
    .await?;

    Ok(video)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parsing_whitelists_columns() {
        assert_eq!(VideoSort::parse(Some("views")), VideoSort::Views);
        assert_eq!(VideoSort::parse(Some("duration")), VideoSort::Duration);
        assert_eq!(VideoSort::parse(Some("title")), VideoSort::Title);
        assert_eq!(VideoSort::parse(Some("created_at")), VideoSort::CreatedAt);
        // Unknown input falls back instead of reaching the SQL string
        assert_eq!(
            VideoSort::parse(Some("views; DROP TABLE videos")),
            VideoSort::CreatedAt
        );
        assert_eq!(VideoSort::parse(None), VideoSort::CreatedAt);
    }
}
