//! Route definitions for the `/notebooks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::notebooks;
use crate::state::AppState;

/// Routes mounted at `/notebooks`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notebooks::list).post(notebooks::create))
        .route(
            "/{id}",
            get(notebooks::get_by_id)
                .put(notebooks::update)
                .delete(notebooks::delete),
        )
}
