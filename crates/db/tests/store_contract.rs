//! Behavioural contract shared by every [`NoteStore`] backend.
//!
//! Each scenario is an `async fn` over `&dyn NoteStore`; the
//! `contract_tests!` macro runs it once against a fresh SQLite store and once
//! against a fresh in-memory store so the two cannot drift apart.

mod common;

use assert_matches::assert_matches;
use common::{new_note, new_notebook, tick};
use notebook_core::error::CoreError;
use notebook_db::models::note::{CreateNote, NoteFilter, UpdateNote};
use notebook_db::models::notebook::{CreateNotebook, UpdateNotebook};
use notebook_db::models::tag::TagCount;
use notebook_db::store::{NoteStore, StoreError};

macro_rules! contract_tests {
    ($($name:ident),* $(,)?) => {
        mod sqlite_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let store = super::common::sqlite_store().await;
                    super::$name(&*store).await;
                }
            )*
        }

        mod memory_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let store = super::common::memory_store().await;
                    super::$name(&*store).await;
                }
            )*
        }
    };
}

contract_tests!(
    create_notebook_applies_defaults,
    create_notebook_rejects_invalid_input,
    notebooks_list_newest_first_with_live_counts,
    update_notebook_changes_only_given_fields,
    update_notebook_missing_or_invalid,
    delete_notebook_cascades_to_notes,
    create_note_defaults_and_tags,
    create_note_in_unknown_notebook_is_validation,
    update_note_refreshes_timestamp_and_tags,
    update_note_rejects_blank_title,
    list_notes_filters_and_orders,
    delete_then_restore_lifecycle,
    restore_live_note_is_not_found,
    delete_note_is_idempotent,
    move_note_between_notebooks,
    move_note_to_unknown_notebook_leaves_note_unchanged,
    search_is_case_insensitive_and_skips_trash,
    search_rejects_blank_query,
    tags_count_live_notes_only,
    clearing_hashtags_removes_tags,
    end_to_end_favorite_and_trash_flow,
);

// ---------------------------------------------------------------------------
// Test: notebooks
// ---------------------------------------------------------------------------

async fn create_notebook_applies_defaults(store: &dyn NoteStore) {
    let nb = store
        .create_notebook(&new_notebook("  Journal  "))
        .await
        .unwrap();

    assert_eq!(nb.name, "Journal", "name should be trimmed");
    assert_eq!(nb.color, "#95E1D3", "color should default");
    assert_eq!(nb.note_count, 0);
    assert_eq!(nb.created_at, nb.updated_at);

    let fetched = store.get_notebook(nb.id).await.unwrap().unwrap();
    assert_eq!(fetched, nb);
}

async fn create_notebook_rejects_invalid_input(store: &dyn NoteStore) {
    let blank = store.create_notebook(&new_notebook("   ")).await;
    assert_matches!(blank, Err(StoreError::Core(CoreError::Validation(_))));

    let bad_color = store
        .create_notebook(&CreateNotebook {
            name: "Colors".to_string(),
            color: Some("red".to_string()),
        })
        .await;
    assert_matches!(bad_color, Err(StoreError::Core(CoreError::Validation(_))));

    assert!(store.list_notebooks().await.unwrap().is_empty());
}

async fn notebooks_list_newest_first_with_live_counts(store: &dyn NoteStore) {
    let first = store.create_notebook(&new_notebook("First")).await.unwrap();
    tick().await;
    let second = store.create_notebook(&new_notebook("Second")).await.unwrap();

    let kept = store
        .create_note(&new_note(first.id, "Kept", ""))
        .await
        .unwrap();
    let trashed = store
        .create_note(&new_note(first.id, "Trashed", ""))
        .await
        .unwrap();
    store.delete_note(trashed.id).await.unwrap();

    let notebooks = store.list_notebooks().await.unwrap();
    let ids: Vec<i64> = notebooks.iter().map(|nb| nb.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(notebooks[1].note_count, 1, "trashed note is not counted");
    assert_eq!(notebooks[0].note_count, 0);
    assert!(kept.id > 0);
}

async fn update_notebook_changes_only_given_fields(store: &dyn NoteStore) {
    let nb = store
        .create_notebook(&CreateNotebook {
            name: "Work".to_string(),
            color: Some("#4ECDC4".to_string()),
        })
        .await
        .unwrap();
    tick().await;

    let renamed = store
        .update_notebook(
            nb.id,
            &UpdateNotebook {
                name: Some(" Office ".to_string()),
                color: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(renamed.name, "Office");
    assert_eq!(renamed.color, "#4ECDC4");
    assert_eq!(renamed.created_at, nb.created_at);
    assert!(renamed.updated_at > nb.updated_at);
}

async fn update_notebook_missing_or_invalid(store: &dyn NoteStore) {
    let missing = store
        .update_notebook(999, &UpdateNotebook::default())
        .await;
    assert_matches!(
        missing,
        Err(StoreError::Core(CoreError::NotFound { entity: "Notebook", id: 999 }))
    );

    let nb = store.create_notebook(&new_notebook("Valid")).await.unwrap();
    let blank = store
        .update_notebook(
            nb.id,
            &UpdateNotebook {
                name: Some("".to_string()),
                color: None,
            },
        )
        .await;
    assert_matches!(blank, Err(StoreError::Core(CoreError::Validation(_))));

    let bad_color = store
        .update_notebook(
            nb.id,
            &UpdateNotebook {
                name: None,
                color: Some("#12345".to_string()),
            },
        )
        .await;
    assert_matches!(bad_color, Err(StoreError::Core(CoreError::Validation(_))));

    let unchanged = store.get_notebook(nb.id).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "Valid");
}

async fn delete_notebook_cascades_to_notes(store: &dyn NoteStore) {
    let doomed = store.create_notebook(&new_notebook("Doomed")).await.unwrap();
    let other = store.create_notebook(&new_notebook("Other")).await.unwrap();
    let live = store
        .create_note(&new_note(doomed.id, "Live", "#gone"))
        .await
        .unwrap();
    let trashed = store
        .create_note(&new_note(doomed.id, "Trashed", ""))
        .await
        .unwrap();
    store.delete_note(trashed.id).await.unwrap();
    let survivor = store
        .create_note(&new_note(other.id, "Survivor", ""))
        .await
        .unwrap();

    store.delete_notebook(doomed.id).await.unwrap();

    assert!(store.get_notebook(doomed.id).await.unwrap().is_none());
    assert!(store.get_note(live.id).await.unwrap().is_none());
    assert!(store.get_note(trashed.id).await.unwrap().is_none());
    assert!(store.get_note(survivor.id).await.unwrap().is_some());
    assert!(store.list_tags().await.unwrap().is_empty());

    let again = store.delete_notebook(doomed.id).await;
    assert_matches!(again, Err(StoreError::Core(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Test: notes
// ---------------------------------------------------------------------------

async fn create_note_defaults_and_tags(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Inbox")).await.unwrap();

    let bare = store
        .create_note(&CreateNote {
            notebook_id: nb.id,
            ..CreateNote::default()
        })
        .await
        .unwrap();
    assert_eq!(bare.title, "Untitled");
    assert_eq!(bare.content, "");
    assert!(!bare.is_favorite);
    assert!(!bare.is_deleted);
    assert!(bare.tags.is_empty());

    let blank_title = store
        .create_note(&new_note(nb.id, "   ", "Plan #Q3 and #q3 #launch"))
        .await
        .unwrap();
    assert_eq!(blank_title.title, "Untitled");
    assert_eq!(blank_title.tags, vec!["q3", "launch"]);

    let fetched = store.get_note(blank_title.id).await.unwrap().unwrap();
    assert_eq!(fetched.tags, vec!["q3", "launch"]);
}

async fn create_note_in_unknown_notebook_is_validation(store: &dyn NoteStore) {
    let result = store.create_note(&new_note(404, "Orphan", "")).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));
    assert!(store
        .list_notes(&NoteFilter::default())
        .await
        .unwrap()
        .is_empty());
}

async fn update_note_refreshes_timestamp_and_tags(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Drafts")).await.unwrap();
    let note = store
        .create_note(&new_note(nb.id, "Draft", "first #alpha"))
        .await
        .unwrap();
    tick().await;

    // An empty update still counts as an edit.
    let touched = store
        .update_note(note.id, &UpdateNote::default())
        .await
        .unwrap();
    assert!(touched.updated_at > note.updated_at);
    assert_eq!(touched.title, "Draft");
    assert_eq!(touched.created_at, note.created_at);
    tick().await;

    let edited = store
        .update_note(
            note.id,
            &UpdateNote {
                title: Some(" Final ".to_string()),
                content: Some("second #beta".to_string()),
                ..UpdateNote::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.title, "Final");
    assert_eq!(edited.tags, vec!["beta"]);
    assert!(edited.updated_at > touched.updated_at);

    let tags = store.list_tags().await.unwrap();
    assert_eq!(
        tags,
        vec![TagCount {
            name: "beta".to_string(),
            count: 1
        }]
    );

    let missing = store.update_note(999, &UpdateNote::default()).await;
    assert_matches!(
        missing,
        Err(StoreError::Core(CoreError::NotFound { entity: "Note", id: 999 }))
    );
}

async fn update_note_rejects_blank_title(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Strict")).await.unwrap();
    let note = store
        .create_note(&new_note(nb.id, "Keep me", ""))
        .await
        .unwrap();

    let result = store
        .update_note(
            note.id,
            &UpdateNote {
                title: Some("  ".to_string()),
                ..UpdateNote::default()
            },
        )
        .await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));

    let unknown_notebook = store
        .update_note(
            note.id,
            &UpdateNote {
                notebook_id: Some(999),
                ..UpdateNote::default()
            },
        )
        .await;
    assert_matches!(
        unknown_notebook,
        Err(StoreError::Core(CoreError::Validation(_)))
    );

    let unchanged = store.get_note(note.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Keep me");
    assert_eq!(unchanged.notebook_id, nb.id);
}

async fn list_notes_filters_and_orders(store: &dyn NoteStore) {
    let a = store.create_notebook(&new_notebook("A")).await.unwrap();
    let b = store.create_notebook(&new_notebook("B")).await.unwrap();

    let oldest = store.create_note(&new_note(a.id, "Oldest", "")).await.unwrap();
    tick().await;
    let middle = store
        .create_note(&CreateNote {
            is_favorite: Some(true),
            ..new_note(b.id, "Middle", "")
        })
        .await
        .unwrap();
    tick().await;
    let newest = store.create_note(&new_note(a.id, "Newest", "")).await.unwrap();
    tick().await;
    let trashed = store.create_note(&new_note(a.id, "Trashed", "")).await.unwrap();
    store.delete_note(trashed.id).await.unwrap();

    let ids = |notes: Vec<notebook_db::models::note::Note>| -> Vec<i64> {
        notes.into_iter().map(|n| n.id).collect()
    };

    let all = store.list_notes(&NoteFilter::default()).await.unwrap();
    assert_eq!(ids(all), vec![newest.id, middle.id, oldest.id]);

    let in_a = store
        .list_notes(&NoteFilter {
            notebook_id: Some(a.id),
            ..NoteFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(ids(in_a), vec![newest.id, oldest.id]);

    let favorites = store.list_favorites().await.unwrap();
    assert_eq!(ids(favorites), vec![middle.id]);

    let trash = store.list_trash().await.unwrap();
    assert_eq!(ids(trash), vec![trashed.id]);

    // Editing bumps a note to the top.
    tick().await;
    store
        .update_note(oldest.id, &UpdateNote::default())
        .await
        .unwrap();
    let reordered = store.list_notes(&NoteFilter::default()).await.unwrap();
    assert_eq!(ids(reordered), vec![oldest.id, newest.id, middle.id]);
}

// ---------------------------------------------------------------------------
// Test: trash
// ---------------------------------------------------------------------------

async fn delete_then_restore_lifecycle(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Bin")).await.unwrap();
    let note = store
        .create_note(&new_note(nb.id, "Recoverable", "#keep"))
        .await
        .unwrap();

    let deleted = store.delete_note(note.id).await.unwrap();
    assert!(deleted.is_deleted);
    assert!(store
        .list_notes(&NoteFilter::default())
        .await
        .unwrap()
        .is_empty());
    assert!(store.list_tags().await.unwrap().is_empty());

    let restored = store.restore_note(note.id).await.unwrap();
    assert!(!restored.is_deleted);
    assert_eq!(restored.title, "Recoverable");
    assert!(store.list_trash().await.unwrap().is_empty());
    assert_eq!(store.list_tags().await.unwrap().len(), 1);

    let again = store.restore_note(note.id).await;
    assert_matches!(
        again,
        Err(StoreError::Core(CoreError::NotFound {
            entity: "TrashedNote",
            ..
        }))
    );
}

async fn restore_live_note_is_not_found(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Live")).await.unwrap();
    let note = store.create_note(&new_note(nb.id, "Alive", "")).await.unwrap();

    let result = store.restore_note(note.id).await;
    assert_matches!(result, Err(StoreError::Core(CoreError::NotFound { .. })));

    let missing = store.restore_note(999).await;
    assert_matches!(missing, Err(StoreError::Core(CoreError::NotFound { .. })));
}

async fn delete_note_is_idempotent(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Twice")).await.unwrap();
    let note = store.create_note(&new_note(nb.id, "Once", "")).await.unwrap();

    store.delete_note(note.id).await.unwrap();
    let second = store.delete_note(note.id).await.unwrap();
    assert!(second.is_deleted);
    assert_eq!(store.list_trash().await.unwrap().len(), 1);

    let missing = store.delete_note(999).await;
    assert_matches!(
        missing,
        Err(StoreError::Core(CoreError::NotFound { entity: "Note", .. }))
    );
}

// ---------------------------------------------------------------------------
// Test: move
// ---------------------------------------------------------------------------

async fn move_note_between_notebooks(store: &dyn NoteStore) {
    let from = store.create_notebook(&new_notebook("From")).await.unwrap();
    let to = store.create_notebook(&new_notebook("To")).await.unwrap();
    let note = store.create_note(&new_note(from.id, "Nomad", "")).await.unwrap();
    tick().await;

    let moved = store.move_note(note.id, to.id).await.unwrap();
    assert_eq!(moved.notebook_id, to.id);
    assert!(moved.updated_at > note.updated_at);

    assert_eq!(
        store.get_notebook(from.id).await.unwrap().unwrap().note_count,
        0
    );
    assert_eq!(store.get_notebook(to.id).await.unwrap().unwrap().note_count, 1);
}

async fn move_note_to_unknown_notebook_leaves_note_unchanged(store: &dyn NoteStore) {
    let home = store.create_notebook(&new_notebook("Home")).await.unwrap();
    let note = store.create_note(&new_note(home.id, "Stay", "")).await.unwrap();

    let result = store.move_note(note.id, 999).await;
    assert_matches!(
        result,
        Err(StoreError::Core(CoreError::NotFound {
            entity: "Notebook",
            id: 999
        }))
    );

    let unchanged = store.get_note(note.id).await.unwrap().unwrap();
    assert_eq!(unchanged, note);

    let missing_note = store.move_note(999, home.id).await;
    assert_matches!(
        missing_note,
        Err(StoreError::Core(CoreError::NotFound { entity: "Note", .. }))
    );
}

// ---------------------------------------------------------------------------
// Test: search
// ---------------------------------------------------------------------------

async fn search_is_case_insensitive_and_skips_trash(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Work")).await.unwrap();
    let by_title = store
        .create_note(&new_note(nb.id, "Weekly Meeting", "agenda"))
        .await
        .unwrap();
    tick().await;
    let by_content = store
        .create_note(&new_note(nb.id, "Notes", "after the MEETING we left"))
        .await
        .unwrap();
    let trashed = store
        .create_note(&new_note(nb.id, "Old meeting", ""))
        .await
        .unwrap();
    store.delete_note(trashed.id).await.unwrap();
    store
        .create_note(&new_note(nb.id, "Unrelated", "lunch"))
        .await
        .unwrap();

    let hits = store.search_notes("  meeting ").await.unwrap();
    let ids: Vec<i64> = hits.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![by_content.id, by_title.id]);

    let unicode = store
        .create_note(&new_note(nb.id, "ÉCOLE", ""))
        .await
        .unwrap();
    let hits = store.search_notes("école").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, unicode.id);
}

async fn search_rejects_blank_query(store: &dyn NoteStore) {
    let result = store.search_notes("   ").await;
    assert_matches!(result, Err(StoreError::Core(CoreError::Validation(_))));
}

// ---------------------------------------------------------------------------
// Test: tags
// ---------------------------------------------------------------------------

async fn tags_count_live_notes_only(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Tagged")).await.unwrap();
    store
        .create_note(&new_note(nb.id, "One", "#work #urgent #work"))
        .await
        .unwrap();
    store
        .create_note(&new_note(nb.id, "Two", "#Work #home"))
        .await
        .unwrap();
    let trashed = store
        .create_note(&new_note(nb.id, "Three", "#home #archive"))
        .await
        .unwrap();
    store.delete_note(trashed.id).await.unwrap();

    let tags = store.list_tags().await.unwrap();
    let pairs: Vec<(&str, i64)> = tags.iter().map(|t| (t.name.as_str(), t.count)).collect();
    assert_eq!(pairs, vec![("work", 2), ("home", 1), ("urgent", 1)]);
}

async fn clearing_hashtags_removes_tags(store: &dyn NoteStore) {
    let nb = store.create_notebook(&new_notebook("Clean")).await.unwrap();
    let note = store
        .create_note(&new_note(nb.id, "Tagged", "#temporary"))
        .await
        .unwrap();

    let cleared = store
        .update_note(
            note.id,
            &UpdateNote {
                content: Some("no more tags".to_string()),
                ..UpdateNote::default()
            },
        )
        .await
        .unwrap();
    assert!(cleared.tags.is_empty());
    assert!(store.list_tags().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: end-to-end flow
// ---------------------------------------------------------------------------

async fn end_to_end_favorite_and_trash_flow(store: &dyn NoteStore) {
    let work = store
        .create_notebook(&CreateNotebook {
            name: "Work".to_string(),
            color: Some("#4ECDC4".to_string()),
        })
        .await
        .unwrap();

    let note = store
        .create_note(&new_note(work.id, "Standup", "Discuss #blockers"))
        .await
        .unwrap();

    let tags = store.list_tags().await.unwrap();
    assert!(tags.contains(&TagCount {
        name: "blockers".to_string(),
        count: 1
    }));

    store
        .update_note(
            note.id,
            &UpdateNote {
                is_favorite: Some(true),
                ..UpdateNote::default()
            },
        )
        .await
        .unwrap();
    let favorites = store.list_favorites().await.unwrap();
    assert!(favorites.iter().any(|n| n.id == note.id));

    store.delete_note(note.id).await.unwrap();
    assert!(!store
        .list_favorites()
        .await
        .unwrap()
        .iter()
        .any(|n| n.id == note.id));
    assert!(!store
        .list_notes(&NoteFilter::default())
        .await
        .unwrap()
        .iter()
        .any(|n| n.id == note.id));
    assert!(store
        .list_trash()
        .await
        .unwrap()
        .iter()
        .any(|n| n.id == note.id));
}
