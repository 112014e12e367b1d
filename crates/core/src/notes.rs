//! Note input rules: title defaults, search query handling, and matching.

use crate::error::CoreError;

/// Title given to a note created without one.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled";

/// Title for a new note: trimmed, or [`DEFAULT_NOTE_TITLE`] when blank or absent.
pub fn title_for_new_note(title: Option<&str>) -> String {
    match title.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_NOTE_TITLE.to_string(),
    }
}

/// Title supplied on update: trimmed, and must not be blank.
pub fn normalize_title_update(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Note title cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim a search query and reject it if blank.
pub fn normalize_search_query(query: &str) -> Result<String, CoreError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Search query is required".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive substring match over a note's title or content.
///
/// `needle_lower` must already be lowercased.
pub fn matches_query(title: &str, content: &str, needle_lower: &str) -> bool {
    title.to_lowercase().contains(needle_lower) || content.to_lowercase().contains(needle_lower)
}
