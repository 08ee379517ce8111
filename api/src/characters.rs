use axum::extract::{Path, Query, State};
use axum::Json;
use heroes_client::{character_detail, mapper};
use heroes_shared::{CharacterDetailRecord, CharacterListRecord};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    name: String,
}

/// GET /api/characters — the active list, loading the first page if needed
pub async fn list_characters(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CharacterListRecord>>> {
    let active = state.characters.ensure_loaded().await?;
    Ok(Json(mapper::character_list_records(&active)))
}

/// POST /api/characters/reload
pub async fn reload_characters(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CharacterListRecord>>> {
    let items = state.characters.load_initial().await?;
    Ok(Json(mapper::character_list_records(&items)))
}

/// POST /api/characters/more — only the newly appended records
pub async fn load_more_characters(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CharacterListRecord>>> {
    let fresh = state.characters.load_more().await?;
    Ok(Json(mapper::character_list_records(&fresh)))
}

/// GET /api/characters/search?name=...
pub async fn search_characters(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<CharacterListRecord>>> {
    let found = state.characters.search(&params.name).await?;
    Ok(Json(mapper::character_list_records(&found)))
}

/// GET /api/characters/:id
pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CharacterDetailRecord>> {
    let character = character_detail(state.source.as_ref(), id).await?;
    Ok(Json(mapper::character_detail_record(&character)))
}
