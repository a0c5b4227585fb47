//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Comment content gets a second, stricter pass through
//! `Comment::validate_content` inside the store (trimming and character
//! counting); the derive-level rules reject the obvious cases early.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use reactable_core::entities::strip_tags;

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"),
        custom(function = validate_tag_free)
    )]
    pub content: String,
}

impl CreateCommentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Update comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(
        length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"),
        custom(function = validate_tag_free)
    )]
    pub content: String,
}

impl UpdateCommentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Reject content carrying HTML/XML tags
fn validate_tag_free(content: &str) -> Result<(), ValidationError> {
    let trimmed = content.trim();
    if strip_tags(trimmed) != trimmed {
        return Err(ValidationError::new("contains_markup")
            .with_message("Comment must not contain HTML tags".into()));
    }
    Ok(())
}
