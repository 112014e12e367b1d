//! Repository for the `notes` table.

use notebook_core::types::{DbId, Timestamp};
use sqlx::{Executor, QueryBuilder, Sqlite};

use crate::models::note::{Note, NoteFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, notebook_id, title, content, is_favorite, is_deleted, created_at, updated_at";

/// Newest activity first; ID breaks timestamp ties.
const ORDER_BY: &str = " ORDER BY updated_at DESC, id DESC";

/// Field changes for [`NoteRepo::update`]. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct NoteChanges<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub is_favorite: Option<bool>,
    pub notebook_id: Option<DbId>,
}

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note, returning its new ID. Inputs must already be validated.
    pub async fn insert<'e, E>(
        executor: E,
        notebook_id: DbId,
        title: &str,
        content: &str,
        is_favorite: bool,
        now: Timestamp,
    ) -> Result<DbId, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO notes (notebook_id, title, content, is_favorite, is_deleted, created_at, updated_at) \
             VALUES (?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(notebook_id)
        .bind(title)
        .bind(content)
        .bind(is_favorite)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Find a note by ID, deleted or not.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Note>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = ?");
        let note = sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(note.map(Note::with_tags))
    }

    /// List notes matching every provided filter, most recently updated first.
    ///
    /// Deleted notes are excluded unless `filter.is_deleted` says otherwise.
    pub async fn list<'e, E>(executor: E, filter: &NoteFilter) -> Result<Vec<Note>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM notes WHERE is_deleted = "));
        builder.push_bind(filter.is_deleted.unwrap_or(false));

        if let Some(notebook_id) = filter.notebook_id {
            builder.push(" AND notebook_id = ").push_bind(notebook_id);
        }
        if let Some(is_favorite) = filter.is_favorite {
            builder.push(" AND is_favorite = ").push_bind(is_favorite);
        }
        builder.push(ORDER_BY);

        let notes = builder.build_query_as::<Note>().fetch_all(executor).await?;
        Ok(notes.into_iter().map(Note::with_tags).collect())
    }

    /// Apply `changes` and refresh `updated_at`. Returns `true` if a row was updated.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        changes: &NoteChanges<'_>,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE notes SET updated_at = ");
        builder.push_bind(now);

        if let Some(title) = changes.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(content) = changes.content {
            builder.push(", content = ").push_bind(content);
        }
        if let Some(is_favorite) = changes.is_favorite {
            builder.push(", is_favorite = ").push_bind(is_favorite);
        }
        if let Some(notebook_id) = changes.notebook_id {
            builder.push(", notebook_id = ").push_bind(notebook_id);
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(executor).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear the soft-delete flag, refreshing `updated_at`.
    ///
    /// Only rows whose flag differs from `deleted` are touched when
    /// `only_if_changed` is set; returns `true` if a row was updated.
    pub async fn set_deleted<'e, E>(
        executor: E,
        id: DbId,
        deleted: bool,
        only_if_changed: bool,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE notes SET is_deleted = ");
        builder
            .push_bind(deleted)
            .push(", updated_at = ")
            .push_bind(now)
            .push(" WHERE id = ")
            .push_bind(id);
        if only_if_changed {
            builder.push(" AND is_deleted <> ").push_bind(deleted);
        }

        let result = builder.build().execute(executor).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete every note in a notebook. Returns the number removed.
    pub async fn delete_by_notebook<'e, E>(executor: E, notebook_id: DbId) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM notes WHERE notebook_id = ?")
            .bind(notebook_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
