//! Handlers for the `/notebooks` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notebook_core::error::CoreError;
use notebook_core::types::DbId;
use notebook_db::models::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// GET /api/notebooks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Notebook>>> {
    let notebooks = state.store.list_notebooks().await?;
    Ok(Json(notebooks))
}

/// POST /api/notebooks
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateNotebook>,
) -> AppResult<(StatusCode, Json<Notebook>)> {
    let notebook = state.store.create_notebook(&input).await?;
    Ok((StatusCode::CREATED, Json(notebook)))
}

/// GET /api/notebooks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Notebook>> {
    let notebook = state
        .store
        .get_notebook(id)
        .await?
        .ok_or(AppError::Core(CoreError::notebook_not_found(id)))?;
    Ok(Json(notebook))
}

/// PUT /api/notebooks/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateNotebook>,
) -> AppResult<Json<Notebook>> {
    let notebook = state.store.update_notebook(id, &input).await?;
    Ok(Json(notebook))
}

/// DELETE /api/notebooks/{id}
///
/// Removes the notebook and every note in it, trashed ones included.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Value>> {
    state.store.delete_notebook(id).await?;
    Ok(Json(json!({ "message": "Notebook deleted successfully" })))
}
