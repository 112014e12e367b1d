//! Repository for the `tags` and `note_tags` tables.

use notebook_core::types::DbId;
use sqlx::{Executor, Sqlite, SqliteConnection};

use crate::models::tag::TagCount;

/// Provides tag upserts, per-note tag replacement, and usage counts.
pub struct TagRepo;

impl TagRepo {
    /// Replace every tag association of a note with `names`.
    ///
    /// Existing rows for the note are removed first, so content without tags
    /// leaves the note untagged. Tag rows are created on first use and are
    /// never removed here.
    pub async fn replace_note_tags(
        conn: &mut SqliteConnection,
        note_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM note_tags WHERE note_id = ?")
            .bind(note_id)
            .execute(&mut *conn)
            .await?;

        for name in names {
            sqlx::query("INSERT OR IGNORE INTO tags (name) VALUES (?)")
                .bind(name)
                .execute(&mut *conn)
                .await?;
            sqlx::query(
                "INSERT OR IGNORE INTO note_tags (note_id, tag_id) \
                 SELECT ?, id FROM tags WHERE name = ?",
            )
            .bind(note_id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Tag names currently associated with a note, alphabetically.
    pub async fn names_for_note<'e, E>(executor: E, note_id: DbId) -> Result<Vec<String>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT t.name FROM tags t \
             JOIN note_tags nt ON nt.tag_id = t.id \
             WHERE nt.note_id = ? \
             ORDER BY t.name",
        )
        .bind(note_id)
        .fetch_all(executor)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Tags used by at least one non-deleted note, by count then name.
    pub async fn list_with_counts<'e, E>(executor: E) -> Result<Vec<TagCount>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, TagCount>(
            "SELECT t.name AS name, COUNT(n.id) AS count \
             FROM tags t \
             JOIN note_tags nt ON nt.tag_id = t.id \
             JOIN notes n ON n.id = nt.note_id AND n.is_deleted = 0 \
             GROUP BY t.id, t.name \
             ORDER BY count DESC, t.name ASC",
        )
        .fetch_all(executor)
        .await
    }

    /// Count all tag rows, including ones no longer attached to any note.
    pub async fn count_all<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tags")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }
}
