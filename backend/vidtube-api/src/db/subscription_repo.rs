/// Subscription database operations
///
/// (subscriber, channel) pairs are unique; toggling is delete-then-insert.
use crate::error::Result;
use crate::models::{SubscriberInfo, Subscription};
use sqlx::PgPool;
use uuid::Uuid;

const SUBSCRIPTION_COLUMNS: &str = "id, subscriber_id, channel_id, created_at";

/// Toggle a subscription. Returns `Some(subscription)` when subscribed,
/// `None` when the existing subscription was removed.
pub async fn toggle(
    pool: &PgPool,
    subscriber_id: Uuid,
    channel_id: Uuid,
) -> Result<Option<Subscription>> {
    let deleted =
        sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2")
            .bind(subscriber_id)
            .bind(channel_id)
            .execute(pool)
            .await?;

    if deleted.rows_affected() > 0 {
        return Ok(None);
    }

    let subscription = sqlx::query_as::<_, Subscription>(&format!(
        r#"
        INSERT INTO subscriptions (subscriber_id, channel_id)
        VALUES ($1, $2)
        ON CONFLICT (subscriber_id, channel_id) DO NOTHING
        RETURNING {SUBSCRIPTION_COLUMNS}
        "#,
    ))
    .bind(subscriber_id)
    .bind(channel_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}

/// Users subscribed to a channel.
pub async fn channel_subscribers(pool: &PgPool, channel_id: Uuid) -> Result<Vec<SubscriberInfo>> {
    let subscribers = sqlx::query_as::<_, SubscriberInfo>(
        r#"
        SELECT u.id, u.username, u.full_name, u.email, u.avatar_url
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(subscribers)
}

/// Channels a user is subscribed to.
pub async fn subscribed_channels(pool: &PgPool, subscriber_id: Uuid) -> Result<Vec<SubscriberInfo>> {
    let channels = sqlx::query_as::<_, SubscriberInfo>(
        r#"
        SELECT u.id, u.username, u.full_name, u.email, u.avatar_url
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        WHERE s.subscriber_id = $1
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(subscriber_id)
    .fetch_all(pool)
    .await?;

    Ok(channels)
}
