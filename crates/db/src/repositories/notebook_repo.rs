//! Repository for the `notebooks` table.

use notebook_core::types::{DbId, Timestamp};
use sqlx::{Executor, Sqlite};

use crate::models::notebook::Notebook;

/// Notebook columns plus the live (non-deleted) note count.
const SELECT_WITH_COUNT: &str = "\
    SELECT nb.id, nb.name, nb.color, nb.created_at, nb.updated_at, \
           (SELECT COUNT(*) FROM notes n \
             WHERE n.notebook_id = nb.id AND n.is_deleted = 0) AS note_count \
    FROM notebooks nb";

/// Provides CRUD operations for notebooks.
pub struct NotebookRepo;

impl NotebookRepo {
    /// Insert a notebook, returning its new ID. Inputs must already be validated.
    pub async fn insert<'e, E>(
        executor: E,
        name: &str,
        color: &str,
        now: Timestamp,
    ) -> Result<DbId, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "INSERT INTO notebooks (name, color, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(color)
        .bind(now)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Find a notebook by ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Notebook>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("{SELECT_WITH_COUNT} WHERE nb.id = ?");
        sqlx::query_as::<_, Notebook>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Whether a notebook with this ID exists.
    pub async fn exists<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let found: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM notebooks WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(found.is_some())
    }

    /// List all notebooks, newest-created first.
    pub async fn list<'e, E>(executor: E) -> Result<Vec<Notebook>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!("{SELECT_WITH_COUNT} ORDER BY nb.created_at DESC, nb.id DESC");
        sqlx::query_as::<_, Notebook>(&query).fetch_all(executor).await
    }

    /// Update a notebook. `None` fields keep their current value.
    ///
    /// Returns `true` if a row was updated.
    pub async fn update<'e, E>(
        executor: E,
        id: DbId,
        name: Option<&str>,
        color: Option<&str>,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE notebooks SET \
                 name = COALESCE(?, name), \
                 color = COALESCE(?, color), \
                 updated_at = ? \
             WHERE id = ?",
        )
        .bind(name)
        .bind(color)
        .bind(now)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a notebook. Returns `true` if a row was removed.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM notebooks WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
