//! Handlers for the `/notes` and `/favorites` resources.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notebook_core::error::CoreError;
use notebook_core::types::DbId;
use notebook_db::models::note::{CreateNote, MoveNote, Note, NoteFilter, UpdateNote};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// GET /api/notes?notebookId=&isFavorite=&isDeleted=
///
/// Without `isDeleted`, trashed notes are excluded.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NoteFilter>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = state.store.list_notes(&filter).await?;
    Ok(Json(notes))
}

/// POST /api/notes
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    let note = state.store.create_note(&input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes/{id}
///
/// Trashed notes are still addressable by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Note>> {
    let note = state
        .store
        .get_note(id)
        .await?
        .ok_or(AppError::Core(CoreError::note_not_found(id)))?;
    Ok(Json(note))
}

/// PUT /api/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateNote>,
) -> AppResult<Json<Note>> {
    let note = state.store.update_note(id, &input).await?;
    Ok(Json(note))
}

/// DELETE /api/notes/{id}
///
/// Soft-delete; the note stays retrievable from `/trash`.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Value>> {
    state.store.delete_note(id).await?;
    Ok(Json(json!({ "message": "Note moved to trash" })))
}

/// POST /api/notes/{id}/move
pub async fn move_to_notebook(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<MoveNote>,
) -> AppResult<Json<Note>> {
    let note = state.store.move_note(id, input.notebook_id).await?;
    Ok(Json(note))
}

/// GET /api/favorites
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<Note>>> {
    let notes = state.store.list_favorites().await?;
    Ok(Json(notes))
}
