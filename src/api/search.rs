//! Song search endpoint

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ApiResult;
use crate::models::SongRecord;
use crate::services::SONG_RESULT_LIMIT;
use crate::AppState;

/// Query parameters for song search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text search query; an absent parameter reads as empty
    #[serde(default)]
    pub query: String,
}

/// Response envelope for a non-empty search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SongRecord>,
}

/// GET /search?query=<text>
///
/// Searches the catalog's song category and returns normalized records
/// in catalog order. An absent or empty query short-circuits to a bare
/// `[]` body; that wire shape predates the envelope and clients depend
/// on the distinction.
pub async fn search_songs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Response> {
    if params.query.is_empty() {
        return Ok(Json(json!([])).into_response());
    }

    let raw_tracks = match state
        .catalog
        .search_songs(&params.query, SONG_RESULT_LIMIT)
        .await
    {
        Ok(tracks) => tracks,
        Err(err) => {
            tracing::warn!(query = %params.query, error = %err, "Catalog search failed");
            return Err(err.into());
        }
    };

    // Hits without a video id are unplayable and dropped; order is preserved
    let results: Vec<SongRecord> = raw_tracks
        .into_iter()
        .filter_map(SongRecord::from_raw)
        .collect();

    tracing::info!(query = %params.query, count = results.len(), "Served song search");

    Ok(Json(SearchResponse { results }).into_response())
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(search_songs))
}
