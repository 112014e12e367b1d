use axum::extract::State;
use axum::Json;
use notebook_db::models::tag::TagCount;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/tags
///
/// Tags on non-deleted notes, most used first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TagCount>>> {
    let tags = state.store.list_tags().await?;
    Ok(Json(tags))
}
