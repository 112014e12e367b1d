use crate::types::DbId;

/// Domain failures raised by the store and the pure validation helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn notebook_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Notebook",
            id,
        }
    }

    pub fn note_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Note", id }
    }

    /// The note exists but is not in the trash (or does not exist at all).
    pub fn trashed_note_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "TrashedNote",
            id,
        }
    }
}
