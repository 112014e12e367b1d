//! Notebook entity model and DTOs.

use notebook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A notebook row, annotated with its count of non-deleted notes.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub note_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new notebook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotebook {
    pub name: String,
    /// `#RRGGBB`; defaults to `#95E1D3` if omitted.
    pub color: Option<String>,
}

/// DTO for updating a notebook. Only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotebook {
    pub name: Option<String>,
    pub color: Option<String>,
}
