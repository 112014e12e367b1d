use std::sync::Arc;

use notebook_db::store::NoteStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The note store selected at startup.
    pub store: Arc<dyn NoteStore>,
}
