//! View state rendered by a UI.

use notebook_core::types::DbId;
use notebook_db::models::note::{Note, NoteFilter};
use notebook_db::models::notebook::Notebook;
use notebook_db::models::tag::TagCount;

/// Which note collection the list pane shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    /// Live notes, optionally narrowed to the active notebook.
    #[default]
    All,
    Favorites,
    Trash,
}

/// Everything the controller knows about what the user is looking at.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub notebooks: Vec<Notebook>,
    /// The note list for the current view or search.
    pub notes: Vec<Note>,
    pub tags: Vec<TagCount>,
    pub active_notebook: Option<DbId>,
    pub view: View,
    pub selected_note: Option<DbId>,
    /// Raw search box contents. A blank query shows the current view.
    pub search_query: String,
    pub loading: bool,
    /// Last failed action, shown until dismissed.
    pub last_error: Option<String>,
}

impl ClientState {
    pub fn selected(&self) -> Option<&Note> {
        let id = self.selected_note?;
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn is_searching(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    /// Filter for the note list of the current view.
    pub fn list_filter(&self) -> NoteFilter {
        match self.view {
            View::All => NoteFilter {
                notebook_id: self.active_notebook,
                ..NoteFilter::default()
            },
            View::Favorites => NoteFilter {
                is_favorite: Some(true),
                ..NoteFilter::default()
            },
            View::Trash => NoteFilter {
                is_deleted: Some(true),
                ..NoteFilter::default()
            },
        }
    }
}
