//! Route definitions for the `/trash` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trash;
use crate::state::AppState;

/// Routes mounted at `/trash`.
///
/// ```text
/// GET    /                  -> list_trashed
/// POST   /{id}/restore      -> restore
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trash::list_trashed))
        .route("/{id}/restore", post(trash::restore))
}
