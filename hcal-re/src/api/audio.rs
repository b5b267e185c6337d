//! Catalog browsing endpoints
//!
//! Thin adapters over [`hcal_common::AudioCatalog`]. Entries are returned as
//! flat JSON objects in catalog order.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use hcal_common::{AudioEntry, AudioType, Chakra};

use crate::{ApiError, ApiResult, AppState};

/// Query parameters for catalog listing
///
/// Filters are plain strings so bad values produce the API's own error body.
#[derive(Debug, Default, Deserialize)]
pub struct AudioListQuery {
    /// Audio type, e.g. `crystal_bowl`
    #[serde(rename = "type")]
    pub audio_type: Option<String>,

    /// Chakra name, e.g. `thirdEye`
    pub chakra: Option<String>,

    /// Case-insensitive text search
    pub q: Option<String>,
}

/// Query parameters for random sampling
#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    3
}

/// GET /api/audio?type=&chakra=&q=
///
/// Full catalog, optionally narrowed by type, chakra and search text.
pub async fn list_audio(
    State(state): State<AppState>,
    Query(query): Query<AudioListQuery>,
) -> ApiResult<Json<Vec<AudioEntry>>> {
    let audio_type = query
        .audio_type
        .as_deref()
        .map(str::parse::<AudioType>)
        .transpose()?;
    let chakra = query
        .chakra
        .as_deref()
        .map(str::parse::<Chakra>)
        .transpose()?;

    let catalog = state.library.catalog();
    let mut entries: Vec<&AudioEntry> = match query.q.as_deref() {
        Some(q) => catalog.search(q),
        None => catalog.all().iter().collect(),
    };

    if let Some(audio_type) = audio_type {
        entries.retain(|e| e.audio_type == audio_type);
    }
    if let Some(chakra) = chakra {
        entries.retain(|e| e.chakra_alignment == Some(chakra));
    }

    debug!(?query, matched = entries.len(), "Catalog listing");
    Ok(Json(entries.into_iter().cloned().collect()))
}

/// GET /api/audio/random?count=N
pub async fn random_audio(
    State(state): State<AppState>,
    Query(query): Query<RandomQuery>,
) -> ApiResult<Json<Vec<AudioEntry>>> {
    if query.count == 0 {
        return Err(ApiError::BadRequest("count must be at least 1".to_string()));
    }

    let sample = state.library.catalog().random_sample(query.count);
    Ok(Json(sample.into_iter().cloned().collect()))
}

/// GET /api/audio/:id
pub async fn get_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AudioEntry>> {
    state
        .library
        .catalog()
        .get_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Audio entry {}", id)))
}
