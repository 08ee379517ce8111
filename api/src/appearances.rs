use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::Json;
use heroes_shared::{AppearanceRecord, AppearanceType};
use tokio::sync::RwLock;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Clone)]
struct CachedGallery {
    records: Vec<AppearanceRecord>,
    fetched_at: Instant,
}

/// Completed galleries by `(character, type)`, kept for `ttl`.
pub struct GalleryCache {
    entries: RwLock<HashMap<(i64, AppearanceType), CachedGallery>>,
    ttl: Duration,
}

impl GalleryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    async fn get(&self, key: (i64, AppearanceType)) -> Option<Vec<AppearanceRecord>> {
        let entries = self.entries.read().await;
        entries
            .get(&key)
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.records.clone())
    }

    async fn put(&self, key: (i64, AppearanceType), records: Vec<AppearanceRecord>) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, cached| cached.fetched_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CachedGallery {
                records,
                fetched_at: Instant::now(),
            },
        );
    }
}

/// GET /api/characters/:id/appearances/:kind — sorted gallery records
pub async fn get_appearances(
    State(state): State<AppState>,
    Path((character_id, kind)): Path<(i64, AppearanceType)>,
) -> ApiResult<Json<Vec<AppearanceRecord>>> {
    let key = (character_id, kind);

    // Check cache
    if let Some(records) = state.gallery_cache.get(key).await {
        tracing::debug!(character_id, %kind, "gallery cache hit");
        return Ok(Json(records));
    }

    // Failures are not cached, so a retry goes back to the source.
    let records = state.gallery.records(character_id, kind).await?;
    state.gallery_cache.put(key, records.clone()).await;

    Ok(Json(records))
}
