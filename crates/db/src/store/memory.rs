//! In-memory [`NoteStore`].
//!
//! All collections sit behind a single `RwLock`; contention is not a concern
//! for a personal note store. Tags are not stored: [`NoteStore::list_tags`]
//! scans the content of live notes on every call.

use async_trait::async_trait;
use chrono::Utc;
use notebook_core::error::CoreError;
use notebook_core::notebooks::{normalize_notebook_name, resolve_color, validate_color};
use notebook_core::notes::{
    matches_query, normalize_search_query, normalize_title_update, title_for_new_note,
};
use notebook_core::tags::{count_tags, extract_tags};
use notebook_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{NoteStore, StoreResult};
use crate::models::note::{CreateNote, Note, NoteFilter, UpdateNote};
use crate::models::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use crate::models::tag::TagCount;

#[derive(Debug, Clone)]
struct NotebookRecord {
    id: DbId,
    name: String,
    color: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug)]
struct Collections {
    notebooks: Vec<NotebookRecord>,
    notes: Vec<Note>,
    next_notebook_id: DbId,
    next_note_id: DbId,
}

impl Collections {
    fn notebook_exists(&self, id: DbId) -> bool {
        self.notebooks.iter().any(|nb| nb.id == id)
    }

    fn note_mut(&mut self, id: DbId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Project a record into the wire shape with its live note count.
    fn annotate(&self, record: &NotebookRecord) -> Notebook {
        let note_count = self
            .notes
            .iter()
            .filter(|n| n.notebook_id == record.id && !n.is_deleted)
            .count() as i64;
        Notebook {
            id: record.id,
            name: record.name.clone(),
            color: record.color.clone(),
            note_count,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn find_notebook(&self, id: DbId) -> Option<Notebook> {
        self.notebooks
            .iter()
            .find(|nb| nb.id == id)
            .map(|nb| self.annotate(nb))
    }

    /// Notes passing `keep`, newest activity first.
    fn sorted_notes(&self, keep: impl Fn(&Note) -> bool) -> Vec<Note> {
        let mut notes: Vec<Note> = self.notes.iter().filter(|n| keep(n)).cloned().collect();
        notes.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        notes
    }
}

/// Store keeping notebooks and notes in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Collections {
                notebooks: Vec::new(),
                notes: Vec::new(),
                next_notebook_id: 1,
                next_note_id: 1,
            }),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_notebooks(&self) -> StoreResult<Vec<Notebook>> {
        let inner = self.inner.read().await;
        let mut notebooks: Vec<Notebook> =
            inner.notebooks.iter().map(|nb| inner.annotate(nb)).collect();
        notebooks.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notebooks)
    }

    async fn get_notebook(&self, id: DbId) -> StoreResult<Option<Notebook>> {
        Ok(self.inner.read().await.find_notebook(id))
    }

    async fn create_notebook(&self, input: &CreateNotebook) -> StoreResult<Notebook> {
        let name = normalize_notebook_name(&input.name)?;
        let color = resolve_color(input.color.as_deref())?;

        let mut inner = self.inner.write().await;
        let id = inner.next_notebook_id;
        inner.next_notebook_id += 1;

        let now = Utc::now();
        let record = NotebookRecord {
            id,
            name,
            color,
            created_at: now,
            updated_at: now,
        };
        let notebook = inner.annotate(&record);
        inner.notebooks.push(record);

        tracing::info!(notebook_id = id, "Notebook created");
        Ok(notebook)
    }

    async fn update_notebook(&self, id: DbId, input: &UpdateNotebook) -> StoreResult<Notebook> {
        let name = input
            .name
            .as_deref()
            .map(normalize_notebook_name)
            .transpose()?;
        if let Some(color) = input.color.as_deref() {
            validate_color(color)?;
        }

        let mut inner = self.inner.write().await;
        let record = inner
            .notebooks
            .iter_mut()
            .find(|nb| nb.id == id)
            .ok_or_else(|| CoreError::notebook_not_found(id))?;

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(color) = &input.color {
            record.color = color.clone();
        }
        record.updated_at = Utc::now();
        let record = record.clone();

        Ok(inner.annotate(&record))
    }

    async fn delete_notebook(&self, id: DbId) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.notebook_exists(id) {
            return Err(CoreError::notebook_not_found(id).into());
        }

        // Both removals happen under the same write guard.
        let before = inner.notes.len();
        inner.notes.retain(|n| n.notebook_id != id);
        let removed_notes = before - inner.notes.len();
        inner.notebooks.retain(|nb| nb.id != id);

        tracing::info!(notebook_id = id, removed_notes, "Notebook deleted");
        Ok(())
    }

    async fn list_notes(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        Ok(self.inner.read().await.sorted_notes(|n| filter.matches(n)))
    }

    async fn get_note(&self, id: DbId) -> StoreResult<Option<Note>> {
        let inner = self.inner.read().await;
        Ok(inner.notes.iter().find(|n| n.id == id).cloned())
    }

    async fn create_note(&self, input: &CreateNote) -> StoreResult<Note> {
        let title = title_for_new_note(input.title.as_deref());
        let content = input.content.clone().unwrap_or_default();

        let mut inner = self.inner.write().await;
        if !inner.notebook_exists(input.notebook_id) {
            return Err(CoreError::Validation(format!(
                "Notebook {} does not exist",
                input.notebook_id
            ))
            .into());
        }

        let id = inner.next_note_id;
        inner.next_note_id += 1;

        let now = Utc::now();
        let note = Note {
            id,
            notebook_id: input.notebook_id,
            title,
            tags: extract_tags(&content),
            content,
            is_favorite: input.is_favorite.unwrap_or(false),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        inner.notes.push(note.clone());

        tracing::info!(note_id = id, notebook_id = input.notebook_id, "Note created");
        Ok(note)
    }

    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Note> {
        let title = input
            .title
            .as_deref()
            .map(normalize_title_update)
            .transpose()?;

        let mut inner = self.inner.write().await;
        if !inner.notes.iter().any(|n| n.id == id) {
            return Err(CoreError::note_not_found(id).into());
        }
        if let Some(notebook_id) = input.notebook_id {
            if !inner.notebook_exists(notebook_id) {
                return Err(
                    CoreError::Validation(format!("Notebook {notebook_id} does not exist")).into(),
                );
            }
        }

        let note = inner
            .note_mut(id)
            .ok_or_else(|| CoreError::note_not_found(id))?;
        if let Some(title) = title {
            note.title = title;
        }
        if let Some(content) = &input.content {
            note.content = content.clone();
            note.tags = extract_tags(content);
        }
        if let Some(is_favorite) = input.is_favorite {
            note.is_favorite = is_favorite;
        }
        if let Some(notebook_id) = input.notebook_id {
            note.notebook_id = notebook_id;
        }
        note.updated_at = Utc::now();

        tracing::debug!(note_id = id, "Note updated");
        Ok(note.clone())
    }

    async fn delete_note(&self, id: DbId) -> StoreResult<Note> {
        let mut inner = self.inner.write().await;
        let note = inner
            .note_mut(id)
            .ok_or_else(|| CoreError::note_not_found(id))?;
        note.is_deleted = true;
        note.updated_at = Utc::now();

        tracing::info!(note_id = id, "Note moved to trash");
        Ok(note.clone())
    }

    async fn restore_note(&self, id: DbId) -> StoreResult<Note> {
        let mut inner = self.inner.write().await;
        let note = inner
            .note_mut(id)
            .filter(|n| n.is_deleted)
            .ok_or_else(|| CoreError::trashed_note_not_found(id))?;
        note.is_deleted = false;
        note.updated_at = Utc::now();

        tracing::info!(note_id = id, "Note restored from trash");
        Ok(note.clone())
    }

    async fn move_note(&self, id: DbId, notebook_id: DbId) -> StoreResult<Note> {
        let mut inner = self.inner.write().await;
        if !inner.notes.iter().any(|n| n.id == id) {
            return Err(CoreError::note_not_found(id).into());
        }
        if !inner.notebook_exists(notebook_id) {
            return Err(CoreError::notebook_not_found(notebook_id).into());
        }

        let note = inner
            .note_mut(id)
            .ok_or_else(|| CoreError::note_not_found(id))?;
        note.notebook_id = notebook_id;
        note.updated_at = Utc::now();

        tracing::info!(note_id = id, notebook_id, "Note moved");
        Ok(note.clone())
    }

    async fn search_notes(&self, query: &str) -> StoreResult<Vec<Note>> {
        let needle = normalize_search_query(query)?.to_lowercase();
        Ok(self
            .inner
            .read()
            .await
            .sorted_notes(|n| !n.is_deleted && matches_query(&n.title, &n.content, &needle)))
    }

    async fn list_tags(&self) -> StoreResult<Vec<TagCount>> {
        let inner = self.inner.read().await;
        let live = inner
            .notes
            .iter()
            .filter(|n| !n.is_deleted)
            .map(|n| n.content.as_str());
        Ok(count_tags(live)
            .into_iter()
            .map(|(name, count)| TagCount { name, count })
            .collect())
    }
}
