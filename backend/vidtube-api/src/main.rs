/// VidTube API - HTTP server
///
/// Mounts every resource router under /api/v1 and wires the shared state:
/// the Postgres pool, the media store client and the JWT secrets.
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use media_store::MediaStore;
use sqlx::postgres::PgPoolOptions;
use std::io;
use tracing_subscriber::EnvFilter;
use vidtube_api::handlers::{
    self, comments, likes, playlists, subscriptions, tweets, users, videos,
};
use vidtube_api::middleware::JwtAuthMiddleware;
use vidtube_api::{AppError, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    auth_core::jwt::initialize_keys(
        &config.jwt.access_token_secret,
        &config.jwt.refresh_token_secret,
    )
    .map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Failed to initialize JWT keys: {e}"),
        )
    })?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("Failed to connect to database: {e}"),
            )
        })?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Migration failed: {e}")))?;

    let media_store = MediaStore::from_env(config.media.clone()).await;

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(%bind_address, env = %config.app.env, "vidtube-api starting");

    let allowed_origins: Vec<String> = config
        .cors
        .allowed_origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(media_store.clone()))
            // Malformed bodies and path/query params keep the error envelope
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/healthcheck", web::get().to(handlers::healthcheck))
            .service(
                web::scope("/api/v1/users")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login))
                    .route("/logout", web::post().to(users::logout))
                    .route(
                        "/refresh-access-token",
                        web::post().to(users::refresh_access_token),
                    )
                    .route("/change-password", web::post().to(users::change_password))
                    .route("/current-user", web::get().to(users::current_user))
                    .route("/update-details", web::patch().to(users::update_details))
                    .route("/change-avatar", web::patch().to(users::change_avatar))
                    .route(
                        "/change-cover-image",
                        web::patch().to(users::change_cover_image),
                    )
                    .route("/channel/{username}", web::get().to(users::channel_profile))
                    .route("/watch-history", web::get().to(users::watch_history)),
            )
            .service(
                web::scope("/api/v1/videos")
                    .route("/publish", web::post().to(videos::publish_video))
                    .route("/video/{videoId}", web::get().to(videos::get_video))
                    .route("/all-videos", web::get().to(videos::list_videos))
                    .route(
                        "/update-video/{videoId}",
                        web::patch().to(videos::update_video),
                    )
                    .route(
                        "/delete-video/{videoId}",
                        web::delete().to(videos::delete_video),
                    )
                    .route(
                        "/toggle-publish/{videoId}",
                        web::patch().to(videos::toggle_publish_status),
                    ),
            )
            .service(
                web::scope("/api/v1/comments")
                    .route("/{videoId}", web::get().to(comments::get_video_comments))
                    .route("/{videoId}", web::post().to(comments::add_comment))
                    .route("/c/{commentId}", web::patch().to(comments::update_comment))
                    .route("/c/{commentId}", web::delete().to(comments::delete_comment)),
            )
            .service(
                web::scope("/api/v1/tweets")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::get().to(tweets::get_user_tweets))
                    .route("/create", web::post().to(tweets::create_tweet))
                    .route("/update/{tweetId}", web::patch().to(tweets::update_tweet))
                    .route("/delete/{tweetId}", web::delete().to(tweets::delete_tweet)),
            )
            .service(
                web::scope("/api/v1/likes")
                    .wrap(JwtAuthMiddleware)
                    .route("/toggle/v/{videoId}", web::post().to(likes::toggle_video_like))
                    .route(
                        "/toggle/c/{commentId}",
                        web::post().to(likes::toggle_comment_like),
                    )
                    .route("/toggle/t/{tweetId}", web::post().to(likes::toggle_tweet_like))
                    .route("/videos", web::get().to(likes::get_liked_videos)),
            )
            .service(
                web::scope("/api/v1/playlists")
                    .wrap(JwtAuthMiddleware)
                    .route("/create", web::post().to(playlists::create_playlist))
                    .route("/{playlistId}", web::get().to(playlists::get_playlist))
                    .route("/user/{userId}", web::get().to(playlists::get_user_playlists))
                    .route(
                        "/update/{playlistId}",
                        web::patch().to(playlists::update_playlist),
                    )
                    .route(
                        "/delete/{playlistId}",
                        web::delete().to(playlists::delete_playlist),
                    )
                    .route(
                        "/add/{videoId}/{playlistId}",
                        web::patch().to(playlists::add_video_to_playlist),
                    )
                    .route(
                        "/remove/{videoId}/{playlistId}",
                        web::patch().to(playlists::remove_video_from_playlist),
                    ),
            )
            .service(
                web::scope("/api/v1/subscriptions")
                    .wrap(JwtAuthMiddleware)
                    .route(
                        "/{channelId}",
                        web::post().to(subscriptions::toggle_subscription),
                    )
                    .route(
                        "/subs/{channelId}",
                        web::get().to(subscriptions::get_channel_subscribers),
                    )
                    .route(
                        "/channels/{subscriberId}",
                        web::get().to(subscriptions::get_subscribed_channels),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
