//! Concurrent writers against a file-backed, multi-connection WAL pool.

mod common;

use std::sync::Arc;

use notebook_db::models::note::{NoteFilter, UpdateNote};
use notebook_db::store::{NoteStore, SqliteStore};
use tempfile::TempDir;
use tokio::task::JoinSet;

/// A migrated store over a pool from `create_pool`, as the server builds it.
async fn file_store() -> (TempDir, Arc<SqliteStore>) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("notebook.db").display());
    let pool = notebook_db::create_pool(&url).await.unwrap();
    notebook_db::run_migrations(&pool).await.unwrap();
    (dir, Arc::new(SqliteStore::new(pool)))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_all_succeed() {
    let (_dir, store) = file_store().await;
    let nb = store
        .create_notebook(&common::new_notebook("Busy"))
        .await
        .unwrap();

    let mut note_ids = Vec::new();
    for i in 0..20 {
        let note = store
            .create_note(&common::new_note(nb.id, &format!("Note {i}"), ""))
            .await
            .unwrap();
        note_ids.push(note.id);
    }

    let mut tasks = JoinSet::new();
    for round in 0..10 {
        for &id in &note_ids {
            let store = Arc::clone(&store);
            tasks.spawn(async move {
                let input = UpdateNote {
                    content: Some(format!("round {round} #r{round}")),
                    ..UpdateNote::default()
                };
                store.update_note(id, &input).await
            });
        }
    }

    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "{} writes failed: {:?}", failures.len(), failures.first());

    let notes = store.list_notes(&NoteFilter::default()).await.unwrap();
    assert_eq!(notes.len(), 20);
    for note in &notes {
        assert_eq!(note.tags.len(), 1, "note {} should carry one tag", note.id);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_moves_and_deletes_succeed() {
    let (_dir, store) = file_store().await;
    let home = store
        .create_notebook(&common::new_notebook("Home"))
        .await
        .unwrap();
    let away = store
        .create_notebook(&common::new_notebook("Away"))
        .await
        .unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..40 {
        let store = Arc::clone(&store);
        let (home, away) = (home.id, away.id);
        tasks.spawn(async move {
            let note = store
                .create_note(&common::new_note(home, &format!("n{i}"), "#shared"))
                .await?;
            store.move_note(note.id, away).await?;
            if i % 2 == 0 {
                store.delete_note(note.id).await?;
            }
            Ok::<_, notebook_db::store::StoreError>(())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().expect("concurrent write failed");
    }

    let away = store.get_notebook(away.id).await.unwrap().unwrap();
    assert_eq!(away.note_count, 20);
    assert_eq!(store.list_trash().await.unwrap().len(), 20);
    let tags = store.list_tags().await.unwrap();
    assert_eq!(tags[0].name, "shared");
    assert_eq!(tags[0].count, 20);
}
