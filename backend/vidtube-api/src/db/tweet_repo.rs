/// Tweet database operations
use crate::error::Result;
use crate::models::Tweet;
use sqlx::PgPool;
use uuid::Uuid;

const TWEET_COLUMNS: &str = "id, owner_id, content, created_at, updated_at";

pub async fn create_tweet(pool: &PgPool, owner_id: Uuid, content: &str) -> Result<Tweet> {
    let tweet = sqlx::query_as::<_, Tweet>(&format!(
        r#"
        INSERT INTO tweets (owner_id, content)
        VALUES ($1, $2)
        RETURNING {TWEET_COLUMNS}
        "#,
    ))
    .bind(owner_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(tweet)
}

pub async fn list_for_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Tweet>> {
    let tweets = sqlx::query_as::<_, Tweet>(&format!(
        r#"
        SELECT {TWEET_COLUMNS} FROM tweets
        WHERE owner_id = $1
        ORDER BY created_at DESC
        "#,
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(tweets)
}

pub async fn find_by_id(pool: &PgPool, tweet_id: Uuid) -> Result<Option<Tweet>> {
    let tweet = sqlx::query_as::<_, Tweet>(&format!(
        "SELECT {TWEET_COLUMNS} FROM tweets WHERE id = $1"
    ))
    .bind(tweet_id)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

pub async fn update_content(pool: &PgPool, tweet_id: Uuid, content: &str) -> Result<Option<Tweet>> {
    let tweet = sqlx::query_as::<_, Tweet>(&format!(
        r#"
        UPDATE tweets SET content = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {TWEET_COLUMNS}
        "#,
    ))
    .bind(content)
    .bind(tweet_id)
    .fetch_optional(pool)
    .await?;

    Ok(tweet)
}

pub async fn delete_tweet(pool: &PgPool, tweet_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(tweet_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
