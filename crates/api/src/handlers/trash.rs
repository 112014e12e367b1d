//! Handlers for the `/trash` resource.

use axum::extract::State;
use axum::Json;
use notebook_core::types::DbId;
use notebook_db::models::note::Note;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::state::AppState;

/// GET /api/trash
pub async fn list_trashed(State(state): State<AppState>) -> AppResult<Json<Vec<Note>>> {
    let notes = state.store.list_trash().await?;
    Ok(Json(notes))
}

/// POST /api/trash/{id}/restore
///
/// Returns 404 unless the note is currently in the trash.
pub async fn restore(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Note>> {
    let note = state.store.restore_note(id).await?;
    Ok(Json(note))
}
