//! User actions over the API and the shared [`ClientState`].
//!
//! Note-list refreshes are sequenced: each takes a number from a monotonic
//! counter and its response is dropped if a newer refresh has already been
//! applied. This keeps a slow search response from overwriting a faster,
//! later one. Edits are applied to local state immediately and saved after
//! the autosave delay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use notebook_core::types::DbId;
use notebook_db::models::note::{CreateNote, Note, UpdateNote};
use notebook_db::models::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use tokio::sync::{Mutex, RwLock};

use crate::api::ApiClient;
use crate::debounce::{Debouncer, AUTOSAVE_DELAY, SEARCH_DELAY};
use crate::error::ClientError;
use crate::state::{ClientState, View};

/// Title and content changes typed into the editor.
#[derive(Debug, Clone, Default)]
pub struct NoteEdit {
    pub title: Option<String>,
    pub content: Option<String>,
}

struct Shared {
    state: ClientState,
    /// Sequence number of the note list currently in `state.notes`.
    applied_seq: u64,
}

struct Inner {
    api: ApiClient,
    shared: RwLock<Shared>,
    next_seq: AtomicU64,
    /// Unsaved edit for one note. Switching notes flushes it first.
    pending_edit: Mutex<Option<(DbId, UpdateNote)>>,
    search: Debouncer,
    autosave: Debouncer,
}

/// Handle to the client controller. Clones share the same state.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<Inner>,
}

impl Controller {
    pub fn new(api: ApiClient) -> Self {
        Self::with_delays(api, SEARCH_DELAY, AUTOSAVE_DELAY)
    }

    pub fn with_delays(api: ApiClient, search_delay: Duration, autosave_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                shared: RwLock::new(Shared {
                    state: ClientState::default(),
                    applied_seq: 0,
                }),
                next_seq: AtomicU64::new(0),
                pending_edit: Mutex::new(None),
                search: Debouncer::new(search_delay),
                autosave: Debouncer::new(autosave_delay),
            }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ClientState {
        self.inner.shared.read().await.state.clone()
    }

    pub async fn dismiss_error(&self) {
        self.inner.shared.write().await.state.last_error = None;
    }

    /// Whether an edit is waiting for autosave.
    pub async fn has_unsaved_changes(&self) -> bool {
        self.inner.pending_edit.lock().await.is_some()
    }

    // ---- loading ----

    /// Load notebooks, the note list for the current view, and tags.
    pub async fn load(&self) -> Result<(), ClientError> {
        self.set_loading(true).await;
        let result = async {
            self.load_notebooks().await?;
            self.refresh_notes().await?;
            self.refresh_tags().await
        }
        .await;
        self.set_loading(false).await;
        result
    }

    pub async fn load_notebooks(&self) -> Result<(), ClientError> {
        let notebooks = self.track(self.inner.api.list_notebooks().await).await?;
        self.inner.shared.write().await.state.notebooks = notebooks;
        Ok(())
    }

    pub async fn refresh_tags(&self) -> Result<(), ClientError> {
        let tags = self.track(self.inner.api.list_tags().await).await?;
        self.inner.shared.write().await.state.tags = tags;
        Ok(())
    }

    /// Reload the note list for the current search or view.
    ///
    /// Returns `false` when a newer refresh was applied first and this
    /// response was discarded.
    pub async fn refresh_notes(&self) -> Result<bool, ClientError> {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let (query, filter) = {
            let shared = self.inner.shared.read().await;
            let state = &shared.state;
            let query = state
                .is_searching()
                .then(|| state.search_query.trim().to_string());
            (query, state.list_filter())
        };

        let result = match &query {
            Some(q) => self.inner.api.search_notes(q).await,
            None => self.inner.api.list_notes(&filter).await,
        };
        let notes = self.track(result).await?;

        let mut shared = self.inner.shared.write().await;
        if seq < shared.applied_seq {
            tracing::debug!(seq, applied = shared.applied_seq, "Discarding stale note list");
            return Ok(false);
        }
        shared.applied_seq = seq;
        let state = &mut shared.state;
        if let Some(selected) = state.selected_note {
            if !notes.iter().any(|n| n.id == selected) {
                state.selected_note = None;
            }
        }
        state.notes = notes;
        Ok(true)
    }

    // ---- navigation ----

    /// Show live notes of one notebook, or of all notebooks with `None`.
    pub async fn select_notebook(&self, notebook_id: Option<DbId>) -> Result<(), ClientError> {
        self.flush_autosave().await?;
        {
            let mut shared = self.inner.shared.write().await;
            let state = &mut shared.state;
            state.active_notebook = notebook_id;
            state.view = View::All;
            state.search_query.clear();
            state.selected_note = None;
        }
        self.inner.search.cancel();
        self.refresh_notes().await.map(|_| ())
    }

    pub async fn set_view(&self, view: View) -> Result<(), ClientError> {
        self.flush_autosave().await?;
        {
            let mut shared = self.inner.shared.write().await;
            let state = &mut shared.state;
            state.view = view;
            if view != View::All {
                state.active_notebook = None;
            }
            state.search_query.clear();
            state.selected_note = None;
        }
        self.inner.search.cancel();
        self.refresh_notes().await.map(|_| ())
    }

    /// Select a note for editing. Any unsaved edit is saved first.
    pub async fn select_note(&self, note_id: Option<DbId>) -> Result<(), ClientError> {
        self.flush_autosave().await?;
        self.inner.shared.write().await.state.selected_note = note_id;
        Ok(())
    }

    // ---- notebooks ----

    pub async fn create_notebook(
        &self,
        name: &str,
        color: Option<&str>,
    ) -> Result<Notebook, ClientError> {
        let input = CreateNotebook {
            name: name.to_string(),
            color: color.map(str::to_string),
        };
        let notebook = self.track(self.inner.api.create_notebook(&input).await).await?;
        self.load_notebooks().await?;
        Ok(notebook)
    }

    pub async fn rename_notebook(&self, id: DbId, name: &str) -> Result<Notebook, ClientError> {
        let input = UpdateNotebook {
            name: Some(name.to_string()),
            color: None,
        };
        let notebook = self.track(self.inner.api.update_notebook(id, &input).await).await?;
        self.load_notebooks().await?;
        Ok(notebook)
    }

    /// Delete a notebook with all its notes. If it was active, the view falls
    /// back to all notebooks.
    pub async fn delete_notebook(&self, id: DbId) -> Result<(), ClientError> {
        self.flush_autosave().await?;
        self.track(self.inner.api.delete_notebook(id).await).await?;
        {
            let mut shared = self.inner.shared.write().await;
            if shared.state.active_notebook == Some(id) {
                shared.state.active_notebook = None;
            }
        }
        self.load_notebooks().await?;
        self.refresh_notes().await?;
        self.refresh_tags().await
    }

    // ---- notes ----

    /// Create an untitled note in the active notebook (or the first one) and
    /// select it.
    pub async fn create_note(&self) -> Result<Note, ClientError> {
        self.flush_autosave().await?;
        let notebook_id = {
            let shared = self.inner.shared.read().await;
            shared
                .state
                .active_notebook
                .or_else(|| shared.state.notebooks.first().map(|nb| nb.id))
        };
        let Some(notebook_id) = notebook_id else {
            return self
                .track(Err(ClientError::InvalidAction(
                    "Create a notebook first".to_string(),
                )))
                .await;
        };

        let input = CreateNote {
            notebook_id,
            ..CreateNote::default()
        };
        let note = self.track(self.inner.api.create_note(&input).await).await?;
        {
            let mut shared = self.inner.shared.write().await;
            let state = &mut shared.state;
            if state.view != View::All {
                state.view = View::All;
                state.active_notebook = Some(notebook_id);
            }
            state.search_query.clear();
        }
        self.refresh_notes().await?;
        self.inner.shared.write().await.state.selected_note = Some(note.id);
        self.load_notebooks().await?;
        Ok(note)
    }

    /// Apply an edit locally and schedule an autosave.
    ///
    /// Edits to the same note merge; an edit to a different note saves the
    /// previous one first.
    pub async fn edit_note(&self, id: DbId, edit: NoteEdit) -> Result<(), ClientError> {
        {
            let pending = self.inner.pending_edit.lock().await;
            let other_note_pending = matches!(&*pending, Some((pending_id, _)) if *pending_id != id);
            drop(pending);
            if other_note_pending {
                self.flush_autosave().await?;
            }
        }

        {
            let mut shared = self.inner.shared.write().await;
            if let Some(note) = shared.state.notes.iter_mut().find(|n| n.id == id) {
                if let Some(title) = &edit.title {
                    note.title = title.clone();
                }
                if let Some(content) = &edit.content {
                    note.content = content.clone();
                }
            }
        }

        {
            let mut pending = self.inner.pending_edit.lock().await;
            let (_, changes) = pending.get_or_insert_with(|| (id, UpdateNote::default()));
            if edit.title.is_some() {
                changes.title = edit.title;
            }
            if edit.content.is_some() {
                changes.content = edit.content;
            }
        }

        let controller = self.clone();
        self.inner.autosave.schedule(async move {
            // Failures are recorded in `last_error`.
            let _ = controller.save_pending().await;
        });
        Ok(())
    }

    /// Save any pending edit now instead of waiting for the autosave delay.
    pub async fn flush_autosave(&self) -> Result<(), ClientError> {
        self.inner.autosave.cancel();
        self.save_pending().await
    }

    async fn save_pending(&self) -> Result<(), ClientError> {
        let Some((id, changes)) = self.inner.pending_edit.lock().await.take() else {
            return Ok(());
        };
        tracing::debug!(note_id = id, "Saving note");

        let saved = self.track(self.inner.api.update_note(id, &changes).await).await?;
        self.replace_note(saved).await;
        self.refresh_tags().await
    }

    pub async fn toggle_favorite(&self, id: DbId) -> Result<Note, ClientError> {
        let current = {
            let shared = self.inner.shared.read().await;
            shared.state.notes.iter().find(|n| n.id == id).map(|n| n.is_favorite)
        };
        let is_favorite = match current {
            Some(fav) => fav,
            None => self.track(self.inner.api.get_note(id).await).await?.is_favorite,
        };

        let input = UpdateNote {
            is_favorite: Some(!is_favorite),
            ..UpdateNote::default()
        };
        let note = self.track(self.inner.api.update_note(id, &input).await).await?;
        self.refresh_notes().await?;
        Ok(note)
    }

    /// Move a note to the trash.
    pub async fn delete_note(&self, id: DbId) -> Result<(), ClientError> {
        self.discard_pending_for(id).await;
        self.track(self.inner.api.delete_note(id).await).await?;
        {
            let mut shared = self.inner.shared.write().await;
            if shared.state.selected_note == Some(id) {
                shared.state.selected_note = None;
            }
        }
        self.refresh_notes().await?;
        self.load_notebooks().await?;
        self.refresh_tags().await
    }

    pub async fn restore_note(&self, id: DbId) -> Result<Note, ClientError> {
        let note = self.track(self.inner.api.restore_note(id).await).await?;
        self.refresh_notes().await?;
        self.load_notebooks().await?;
        self.refresh_tags().await?;
        Ok(note)
    }

    pub async fn move_note(&self, id: DbId, notebook_id: DbId) -> Result<Note, ClientError> {
        self.flush_autosave().await?;
        let note = self.track(self.inner.api.move_note(id, notebook_id).await).await?;
        self.refresh_notes().await?;
        self.load_notebooks().await?;
        Ok(note)
    }

    // ---- search ----

    /// Update the search box. The list refreshes after the search delay; a
    /// blank query goes back to the current view.
    pub async fn set_search_query(&self, query: &str) {
        self.inner.shared.write().await.state.search_query = query.to_string();

        let controller = self.clone();
        self.inner.search.schedule(async move {
            let _ = controller.refresh_notes().await;
        });
    }

    // ---- private helpers ----

    async fn set_loading(&self, loading: bool) {
        self.inner.shared.write().await.state.loading = loading;
    }

    /// Record a failure in `last_error`, or clear it on success, and pass
    /// the result through.
    async fn track<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        let last_error = match &result {
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = %err, "Client action failed");
                Some(err.to_string())
            }
        };
        self.inner.shared.write().await.state.last_error = last_error;
        result
    }

    async fn replace_note(&self, saved: Note) {
        let mut shared = self.inner.shared.write().await;
        if let Some(note) = shared.state.notes.iter_mut().find(|n| n.id == saved.id) {
            *note = saved;
        }
    }

    async fn discard_pending_for(&self, id: DbId) {
        let mut pending = self.inner.pending_edit.lock().await;
        if matches!(&*pending, Some((pending_id, _)) if *pending_id == id) {
            *pending = None;
            self.inner.autosave.cancel();
        }
    }
}
