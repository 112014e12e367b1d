use axum::routing::get;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/favorites`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(notes::list_favorites))
}
