//! Tag title normalization and validation.

use crate::error::CoreError;

/// Maximum length of a tag title (characters, after normalization).
pub const MAX_TAG_TITLE_LENGTH: usize = 140;

/// Normalize a tag title for storage: trimmed and lowercased.
pub fn normalize_tag_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Normalize and validate a tag title, returning the stored form.
pub fn validate_tag_title(title: &str) -> Result<String, CoreError> {
    let normalized = normalize_tag_title(title);
    if normalized.is_empty() {
        return Err(CoreError::Validation("Tag title must not be empty".into()));
    }
    if normalized.chars().count() > MAX_TAG_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tag title exceeds maximum length of {MAX_TAG_TITLE_LENGTH}"
        )));
    }
    Ok(normalized)
}
