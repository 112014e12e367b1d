//! Tag usage model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tag name with the number of non-deleted notes that carry it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}
