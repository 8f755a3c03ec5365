/// Database access layer
///
/// One repository module per resource; free async functions over `&PgPool`
/// with explicit column lists.
pub mod comment_repo;
pub mod like_repo;
pub mod playlist_repo;
pub mod subscription_repo;
pub mod tweet_repo;
pub mod user_repo;
pub mod video_repo;
