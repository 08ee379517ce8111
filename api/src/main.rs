use std::sync::Arc;
use std::time::Duration;

use heroes_api::AppState;
use heroes_client::{ApiConfig, MarvelApi};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "heroes_api=debug,heroes_client=debug,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env().expect("Invalid API configuration");
    if config.public_key.is_empty() || config.private_key.is_empty() {
        tracing::warn!("MARVEL_PUBLIC_KEY / MARVEL_PRIVATE_KEY not set, requests will be rejected");
    }
    let story_concurrency = config.story_concurrency;
    let source = MarvelApi::new(config).expect("Failed to build HTTP client");

    let cors_origin =
        std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:1313".to_string());
    let cache_ttl: u64 = std::env::var("GALLERY_CACHE_TTL_SECS")
        .unwrap_or_else(|_| "3600".to_string())
        .parse()
        .expect("GALLERY_CACHE_TTL_SECS must be a valid u64");

    let state = AppState::new(
        Arc::new(source),
        story_concurrency,
        Duration::from_secs(cache_ttl),
    );

    let cors = CorsLayer::new()
        .allow_origin(
            cors_origin
                .parse::<axum::http::HeaderValue>()
                .expect("Invalid CORS_ORIGIN"),
        )
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any());

    let app = heroes_api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    tracing::info!("API server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
