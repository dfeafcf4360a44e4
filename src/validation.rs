//! Form-layer input validation.
//!
//! The store accepts whatever it is given; callers check forms here first.

use crate::error::{MemoError, Result};
use crate::model::MemoFormData;

/// Maximum allowed length for a memo title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed length for memo content.
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// Maximum allowed length for a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Validates a memo title.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(MemoError::Validation("Title cannot be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(MemoError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

/// Validates memo content.
pub fn validate_content(content: &str) -> Result<()> {
    if content.len() > MAX_CONTENT_LENGTH {
        return Err(MemoError::Validation(format!(
            "Content exceeds maximum length of {} characters",
            MAX_CONTENT_LENGTH
        )));
    }
    Ok(())
}

/// Validates a tag name.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(MemoError::Validation("Tag cannot be empty".to_string()));
    }
    if tag.len() > MAX_TAG_LENGTH {
        return Err(MemoError::Validation(format!(
            "Tag exceeds maximum length of {} characters",
            MAX_TAG_LENGTH
        )));
    }
    Ok(())
}

/// Validates every field of a form. Categories are not checked.
pub fn validate_form(form: &MemoFormData) -> Result<()> {
    validate_title(&form.title)?;
    validate_content(&form.content)?;
    for tag in &form.tags {
        validate_tag(tag)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_empty() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn test_validate_title_valid() {
        assert!(validate_title("A valid title").is_ok());
    }

    #[test]
    fn test_validate_title_too_long() {
        let long_title = "a".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long_title).is_err());
    }

    #[test]
    fn test_validate_content_too_long() {
        assert!(validate_content("").is_ok());
        assert!(validate_content(&"x".repeat(MAX_CONTENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_form_checks_tags() {
        let form = MemoFormData::new("ok").with_tags(vec!["fine".into(), "".into()]);
        assert!(validate_form(&form).is_err());

        let form = MemoFormData::new("ok").with_tags(vec!["dup".into(), "dup".into()]);
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_validate_form_ignores_unknown_category() {
        let form = MemoFormData::new("ok").with_category("anything-goes");
        assert!(validate_form(&form).is_ok());
    }
}
