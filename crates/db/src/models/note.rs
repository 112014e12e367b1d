//! Note entity model, DTOs, and list filters.

use notebook_core::tags::extract_tags;
use notebook_core::types::{DbId, Timestamp};
use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
///
/// `tags` is not a column; it is derived from `content` by [`Note::with_tags`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub notebook_id: DbId,
    pub title: String,
    pub content: String,
    pub is_favorite: bool,
    pub is_deleted: bool,
    #[sqlx(skip)]
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    /// Fill `tags` from the note's current content.
    pub fn with_tags(mut self) -> Self {
        self.tags = extract_tags(&self.content);
        self
    }
}

/// DTO for creating a new note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub notebook_id: DbId,
    /// Defaults to "Untitled" if omitted or blank.
    pub title: Option<String>,
    /// Defaults to empty.
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
}

/// DTO for updating a note. Only provided fields change; `updatedAt` always refreshes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
    pub notebook_id: Option<DbId>,
}

/// Body of `POST /notes/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNote {
    pub notebook_id: DbId,
}

/// Filters for note listing. All provided filters must match.
///
/// When `is_deleted` is `None`, deleted notes are excluded. Empty query
/// values (`?notebookId=`) count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notebook_id: Option<DbId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_deleted: Option<bool>,
}

impl NoteFilter {
    /// Whether a note passes every provided filter.
    pub fn matches(&self, note: &Note) -> bool {
        self.notebook_id.is_none_or(|id| note.notebook_id == id)
            && self.is_favorite.is_none_or(|fav| note.is_favorite == fav)
            && note.is_deleted == self.is_deleted.unwrap_or(false)
    }
}

/// Parse a query value, treating a missing or blank value as `None`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}
