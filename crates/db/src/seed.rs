//! Sample data for a fresh store.
//!
//! Seeding goes through [`NoteStore`] so both backends derive tags from the
//! same content. A store that already holds a notebook is left untouched.

use notebook_core::types::DbId;

use crate::models::note::CreateNote;
use crate::models::notebook::CreateNotebook;
use crate::store::{NoteStore, StoreResult};

struct SeedNote {
    notebook: usize,
    title: &'static str,
    content: &'static str,
    is_favorite: bool,
}

const SEED_NOTEBOOKS: &[(&str, &str)] = &[
    ("Personal", "#FF6B6B"),
    ("Work", "#4ECDC4"),
    ("Ideas", "#FFE66D"),
];

const SEED_NOTES: &[SeedNote] = &[
    SeedNote {
        notebook: 0,
        title: "Shopping List",
        content: "Need to buy:\n- Milk\n- Eggs\n- Bread\n- Coffee\n- Fruits\n\n#todo",
        is_favorite: false,
    },
    SeedNote {
        notebook: 0,
        title: "Vacation Plans",
        content: "Planning summer vacation:\n- Research destinations\n- Check flight prices\n- Book hotel\n- Create itinerary",
        is_favorite: true,
    },
    SeedNote {
        notebook: 1,
        title: "Project Roadmap",
        content: "Q1 Goals:\n- Complete feature A\n- Refactor backend\n- Improve test coverage\n- Deploy to production\n\n#important #urgent",
        is_favorite: true,
    },
    SeedNote {
        notebook: 1,
        title: "Meeting Notes",
        content: "Team meeting - Jan 15:\n- Discussed new features\n- Assigned tasks\n- Set deadlines\n- Next meeting: Jan 22\n\n#todo",
        is_favorite: false,
    },
    SeedNote {
        notebook: 2,
        title: "App Ideas",
        content: "Ideas for new apps:\n1. Recipe manager\n2. Habit tracker\n3. Budget planner\n4. Reading list organizer",
        is_favorite: false,
    },
    SeedNote {
        notebook: 2,
        title: "Book Recommendations",
        content: "Books to read:\n- \"Atomic Habits\" by James Clear\n- \"Deep Work\" by Cal Newport\n- \"The Pragmatic Programmer\"",
        is_favorite: true,
    },
    SeedNote {
        notebook: 1,
        title: "Code Snippets",
        content: "Useful code snippets:\n\n// Debounce function\nfn debounce(wait: Duration) {\n    // reset the timer on every call\n}",
        is_favorite: false,
    },
];

/// Insert the sample notebooks and notes if the store has no notebooks.
///
/// Returns `true` when data was inserted.
pub async fn seed_if_empty(store: &dyn NoteStore) -> StoreResult<bool> {
    if !store.list_notebooks().await?.is_empty() {
        tracing::info!("Store already contains data, skipping seed");
        return Ok(false);
    }

    let mut notebook_ids: Vec<DbId> = Vec::with_capacity(SEED_NOTEBOOKS.len());
    for (name, color) in SEED_NOTEBOOKS {
        let notebook = store
            .create_notebook(&CreateNotebook {
                name: (*name).to_string(),
                color: Some((*color).to_string()),
            })
            .await?;
        notebook_ids.push(notebook.id);
    }

    for seed in SEED_NOTES {
        store
            .create_note(&CreateNote {
                notebook_id: notebook_ids[seed.notebook],
                title: Some(seed.title.to_string()),
                content: Some(seed.content.to_string()),
                is_favorite: Some(seed.is_favorite),
            })
            .await?;
    }

    tracing::info!(
        notebooks = SEED_NOTEBOOKS.len(),
        notes = SEED_NOTES.len(),
        "Seeded store with sample data"
    );
    Ok(true)
}
