use axum::extract::State;
use axum::Json;
use notebook_db::models::note::Note;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// A missing `q` is treated like a blank one and rejected by the store.
    #[serde(default)]
    pub q: String,
}

/// GET /api/search?q=
pub async fn search_notes(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = state.store.search_notes(&params.q).await?;
    tracing::debug!(hits = notes.len(), "Search completed");
    Ok(Json(notes))
}
