//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use std::time::Duration;

use notebook_db::models::note::CreateNote;
use notebook_db::models::notebook::CreateNotebook;
use notebook_db::store::{MemoryStore, NoteStore, SqliteStore};
use notebook_db::DbPool;

/// A migrated private in-memory SQLite pool.
pub async fn migrated_pool() -> DbPool {
    let pool = notebook_db::create_memory_pool()
        .await
        .expect("memory pool");
    notebook_db::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}

pub async fn sqlite_store() -> Box<dyn NoteStore> {
    Box::new(SqliteStore::new(migrated_pool().await))
}

pub async fn memory_store() -> Box<dyn NoteStore> {
    Box::new(MemoryStore::new())
}

pub fn new_notebook(name: &str) -> CreateNotebook {
    CreateNotebook {
        name: name.to_string(),
        color: None,
    }
}

pub fn new_note(notebook_id: i64, title: &str, content: &str) -> CreateNote {
    CreateNote {
        notebook_id,
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        is_favorite: None,
    }
}

/// Let the clock advance so consecutive writes get distinct timestamps.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}
