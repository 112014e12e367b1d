pub mod favorites;
pub mod health;
pub mod notebooks;
pub mod notes;
pub mod search;
pub mod tags;
pub mod trash;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                          store health and backend name
///
/// /notebooks                       list, create
/// /notebooks/{id}                  get, update, delete (cascades to notes)
///
/// /notes                           list (?notebookId=&isFavorite=&isDeleted=), create
/// /notes/{id}                      get, update, soft-delete
/// /notes/{id}/move                 move to another notebook (POST)
///
/// /search                          search live notes (?q=)
/// /tags                            tag usage counts
/// /favorites                       favorite live notes
///
/// /trash                           trashed notes
/// /trash/{id}/restore              restore a trashed note (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/notebooks", notebooks::router())
        .nest("/notes", notes::router())
        .nest("/search", search::router())
        .nest("/tags", tags::router())
        .nest("/favorites", favorites::router())
        .nest("/trash", trash::router())
}
