//! Route definitions for the `/notes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// ```text
/// GET    /              -> list (?notebookId=&isFavorite=&isDeleted=)
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete (soft)
/// POST   /{id}/move     -> move_to_notebook
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::list).post(notes::create))
        .route(
            "/{id}",
            get(notes::get_by_id).put(notes::update).delete(notes::delete),
        )
        .route("/{id}/move", post(notes::move_to_notebook))
}
