//! The note store: every notebook, note, search, and tag operation.
//!
//! [`NoteStore`] is implemented by [`SqliteStore`] (relational tables with a
//! tag junction rebuilt on every content write) and [`MemoryStore`] (plain
//! collections behind one lock, tags scanned from content on read). Both
//! share one contract:
//!
//! - notebooks list newest-created first, annotated with live note counts
//! - note listings order by `updated_at` descending, then ID descending
//! - validation failures are [`CoreError::Validation`], missing entities
//!   are [`CoreError::NotFound`]; neither is a crash

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use notebook_core::error::CoreError;
use notebook_core::types::DbId;

use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use crate::models::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use crate::models::tag::TagCount;

/// Failures surfaced by a [`NoteStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An expected business condition (validation, not found).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract shared by the SQLite and in-memory backends.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // -- Notebooks ------------------------------------------------------------

    async fn list_notebooks(&self) -> StoreResult<Vec<Notebook>>;

    async fn get_notebook(&self, id: DbId) -> StoreResult<Option<Notebook>>;

    /// Fails with `Validation` on a blank name or malformed color.
    async fn create_notebook(&self, input: &CreateNotebook) -> StoreResult<Notebook>;

    /// Partial update. Fails with `NotFound` if absent, `Validation` on a
    /// blank name or malformed color.
    async fn update_notebook(&self, id: DbId, input: &UpdateNotebook) -> StoreResult<Notebook>;

    /// Delete the notebook and every note in it, atomically.
    async fn delete_notebook(&self, id: DbId) -> StoreResult<()>;

    // -- Notes ----------------------------------------------------------------

    async fn list_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>>;

    async fn get_note(&self, id: DbId) -> StoreResult<Option<Note>>;

    /// Fails with `Validation` if the notebook does not exist.
    async fn create_note(&self, input: &CreateNote) -> StoreResult<Note>;

    /// Partial update that always refreshes `updated_at`. Fails with
    /// `NotFound` if absent, `Validation` on a blank title or unknown notebook.
    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Note>;

    /// Soft-delete: the note moves to the trash.
    async fn delete_note(&self, id: DbId) -> StoreResult<Note>;

    /// Bring a trashed note back. Fails with `NotFound` unless the note is
    /// currently in the trash.
    async fn restore_note(&self, id: DbId) -> StoreResult<Note>;

    /// Reassign a note. Fails with `NotFound` if the note or the target
    /// notebook is absent; the note is left unchanged in that case.
    async fn move_note(&self, id: DbId, notebook_id: DbId) -> StoreResult<Note>;

    /// Case-insensitive substring search over title and content of live notes.
    async fn search_notes(&self, query: &str) -> StoreResult<Vec<Note>>;

    async fn list_tags(&self) -> StoreResult<Vec<TagCount>>;

    async fn list_favorites(&self) -> StoreResult<Vec<Note>> {
        self.list_notes(&NoteFilter {
            is_favorite: Some(true),
            ..NoteFilter::default()
        })
        .await
    }

    async fn list_trash(&self) -> StoreResult<Vec<Note>> {
        self.list_notes(&NoteFilter {
            is_deleted: Some(true),
            ..NoteFilter::default()
        })
        .await
    }
}
