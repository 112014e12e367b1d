//! Notebook input rules: name trimming and hex color validation.

use crate::error::CoreError;

/// Color assigned to a notebook created without one.
pub const DEFAULT_NOTEBOOK_COLOR: &str = "#95E1D3";

/// Maximum length of a notebook name in characters (after trimming).
pub const MAX_NOTEBOOK_NAME_LENGTH: usize = 100;

/// Trim a notebook name and reject it if nothing is left.
pub fn normalize_notebook_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Notebook name is required".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NOTEBOOK_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Notebook name exceeds maximum length of {MAX_NOTEBOOK_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Check that `color` is a `#RRGGBB` hex code.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be a hex code like #4ECDC4"
        )))
    }
}

/// Resolve the color for a new notebook, falling back to the default.
pub fn resolve_color(color: Option<&str>) -> Result<String, CoreError> {
    match color {
        Some(c) => {
            validate_color(c)?;
            Ok(c.to_string())
        }
        None => Ok(DEFAULT_NOTEBOOK_COLOR.to_string()),
    }
}
