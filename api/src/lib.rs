pub mod appearances;
pub mod characters;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use heroes_client::{AppearanceGallery, CharacterListController, SharedSource};

use crate::appearances::GalleryCache;

#[derive(Clone)]
pub struct AppState {
    pub source: SharedSource,
    pub characters: Arc<CharacterListController>,
    pub gallery: Arc<AppearanceGallery>,
    pub gallery_cache: Arc<GalleryCache>,
}

impl AppState {
    pub fn new(source: SharedSource, story_concurrency: usize, cache_ttl: Duration) -> Self {
        Self {
            characters: Arc::new(CharacterListController::new(source.clone())),
            gallery: Arc::new(AppearanceGallery::new(source.clone(), story_concurrency)),
            gallery_cache: Arc::new(GalleryCache::new(cache_ttl)),
            source,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "ok" }))
        // Character list
        .route("/api/characters", get(characters::list_characters))
        .route("/api/characters/reload", post(characters::reload_characters))
        .route("/api/characters/more", post(characters::load_more_characters))
        .route("/api/characters/search", get(characters::search_characters))
        // Character detail
        .route("/api/characters/{id}", get(characters::get_character))
        .route(
            "/api/characters/{id}/appearances/{kind}",
            get(appearances::get_appearances),
        )
        .with_state(state)
}
