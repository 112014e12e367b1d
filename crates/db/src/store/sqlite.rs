//! SQLite-backed [`NoteStore`].
//!
//! Writes go through one process-wide lock. A deferred transaction that
//! reads and then writes fails with `SQLITE_BUSY` instead of waiting when
//! another connection committed in between, so writers never overlap.
//! Reads stay concurrent under WAL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use notebook_core::error::CoreError;
use notebook_core::notebooks::{normalize_notebook_name, resolve_color, validate_color};
use notebook_core::notes::{
    matches_query, normalize_search_query, normalize_title_update, title_for_new_note,
};
use notebook_core::tags::extract_tags;
use notebook_core::types::DbId;
use tokio::sync::Mutex;

use super::{NoteStore, StoreResult};
use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use crate::models::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use crate::models::tag::TagCount;
use crate::repositories::note_repo::NoteChanges;
use crate::repositories::{NoteRepo, NotebookRepo, TagRepo};
use crate::DbPool;

/// Store over the relational schema in `crates/db/migrations`.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
    write_lock: Arc<Mutex<()>>,
}

impl SqliteStore {
    /// Wrap an already-migrated pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn require_note(&self, id: DbId) -> StoreResult<Note> {
        NoteRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::note_not_found(id).into())
    }
}

#[async_trait]
impl NoteStore for SqliteStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_notebooks(&self) -> StoreResult<Vec<Notebook>> {
        Ok(NotebookRepo::list(&self.pool).await?)
    }

    async fn get_notebook(&self, id: DbId) -> StoreResult<Option<Notebook>> {
        Ok(NotebookRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_notebook(&self, input: &CreateNotebook) -> StoreResult<Notebook> {
        let _write = self.write_lock.lock().await;
        let name = normalize_notebook_name(&input.name)?;
        let color = resolve_color(input.color.as_deref())?;

        let id = NotebookRepo::insert(&self.pool, &name, &color, Utc::now()).await?;
        tracing::info!(notebook_id = id, "Notebook created");

        NotebookRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Notebook {id} vanished after insert")).into())
    }

    async fn update_notebook(&self, id: DbId, input: &UpdateNotebook) -> StoreResult<Notebook> {
        let _write = self.write_lock.lock().await;
        let name = input
            .name
            .as_deref()
            .map(normalize_notebook_name)
            .transpose()?;
        if let Some(color) = input.color.as_deref() {
            validate_color(color)?;
        }

        let updated = NotebookRepo::update(
            &self.pool,
            id,
            name.as_deref(),
            input.color.as_deref(),
            Utc::now(),
        )
        .await?;
        if !updated {
            return Err(CoreError::notebook_not_found(id).into());
        }

        NotebookRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| CoreError::notebook_not_found(id).into())
    }

    async fn delete_notebook(&self, id: DbId) -> StoreResult<()> {
        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        if !NotebookRepo::exists(&mut *tx, id).await? {
            return Err(CoreError::notebook_not_found(id).into());
        }
        let removed_notes = NoteRepo::delete_by_notebook(&mut *tx, id).await?;
        NotebookRepo::delete(&mut *tx, id).await?;

        tx.commit().await?;
        tracing::info!(notebook_id = id, removed_notes, "Notebook deleted");
        Ok(())
    }

    async fn list_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        Ok(NoteRepo::list(&self.pool, filter).await?)
    }

    async fn get_note(&self, id: DbId) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_note(&self, input: &CreateNote) -> StoreResult<Note> {
        let _write = self.write_lock.lock().await;
        let title = title_for_new_note(input.title.as_deref());
        let content = input.content.as_deref().unwrap_or_default();
        let tags = extract_tags(content);

        let mut tx = self.pool.begin().await?;

        if !NotebookRepo::exists(&mut *tx, input.notebook_id).await? {
            return Err(CoreError::Validation(format!(
                "Notebook {} does not exist",
                input.notebook_id
            ))
            .into());
        }
        let id = NoteRepo::insert(
            &mut *tx,
            input.notebook_id,
            &title,
            content,
            input.is_favorite.unwrap_or(false),
            Utc::now(),
        )
        .await?;
        TagRepo::replace_note_tags(&mut tx, id, &tags).await?;

        tx.commit().await?;
        tracing::info!(note_id = id, notebook_id = input.notebook_id, "Note created");

        self.require_note(id).await
    }

    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Note> {
        let _write = self.write_lock.lock().await;
        let title = input
            .title
            .as_deref()
            .map(normalize_title_update)
            .transpose()?;

        let mut tx = self.pool.begin().await?;

        if NoteRepo::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(CoreError::note_not_found(id).into());
        }
        if let Some(notebook_id) = input.notebook_id {
            if !NotebookRepo::exists(&mut *tx, notebook_id).await? {
                return Err(
                    CoreError::Validation(format!("Notebook {notebook_id} does not exist")).into(),
                );
            }
        }

        let changes = NoteChanges {
            title: title.as_deref(),
            content: input.content.as_deref(),
            is_favorite: input.is_favorite,
            notebook_id: input.notebook_id,
        };
        NoteRepo::update(&mut *tx, id, &changes, Utc::now()).await?;
        if let Some(content) = input.content.as_deref() {
            TagRepo::replace_note_tags(&mut tx, id, &extract_tags(content)).await?;
        }

        tx.commit().await?;
        tracing::debug!(note_id = id, "Note updated");

        self.require_note(id).await
    }

    async fn delete_note(&self, id: DbId) -> StoreResult<Note> {
        let _write = self.write_lock.lock().await;
        let updated = NoteRepo::set_deleted(&self.pool, id, true, false, Utc::now()).await?;
        if !updated {
            return Err(CoreError::note_not_found(id).into());
        }
        tracing::info!(note_id = id, "Note moved to trash");
        self.require_note(id).await
    }

    async fn restore_note(&self, id: DbId) -> StoreResult<Note> {
        let _write = self.write_lock.lock().await;
        let restored = NoteRepo::set_deleted(&self.pool, id, false, true, Utc::now()).await?;
        if !restored {
            return Err(CoreError::trashed_note_not_found(id).into());
        }
        tracing::info!(note_id = id, "Note restored from trash");
        self.require_note(id).await
    }

    async fn move_note(&self, id: DbId, notebook_id: DbId) -> StoreResult<Note> {
        let _write = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        if NoteRepo::find_by_id(&mut *tx, id).await?.is_none() {
            return Err(CoreError::note_not_found(id).into());
        }
        if !NotebookRepo::exists(&mut *tx, notebook_id).await? {
            return Err(CoreError::notebook_not_found(notebook_id).into());
        }
        let changes = NoteChanges {
            notebook_id: Some(notebook_id),
            ..NoteChanges::default()
        };
        NoteRepo::update(&mut *tx, id, &changes, Utc::now()).await?;

        tx.commit().await?;
        tracing::info!(note_id = id, notebook_id, "Note moved");

        self.require_note(id).await
    }

    async fn search_notes(&self, query: &str) -> StoreResult<Vec<Note>> {
        let needle = normalize_search_query(query)?.to_lowercase();

        // SQLite's lower() only folds ASCII, so matching happens here to keep
        // results identical to the in-memory store.
        let live = NoteRepo::list(&self.pool, &NoteFilter::default()).await?;
        Ok(live
            .into_iter()
            .filter(|note| matches_query(&note.title, &note.content, &needle))
            .collect())
    }

    async fn list_tags(&self) -> StoreResult<Vec<TagCount>> {
        Ok(TagRepo::list_with_counts(&self.pool).await?)
    }
}
