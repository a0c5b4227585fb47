//! Comment entity - plain-text comment by one user on one entity

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{EntityRef, Snowflake};

/// Maximum comment length in characters (after trimming)
pub const MAX_COMMENT_LEN: usize = 1000;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub entity: EntityRef,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment with already-validated content
    pub fn new(id: Snowflake, entity: EntityRef, user_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            entity,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a user authored this comment
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }

    /// Check if the comment has been edited since creation
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }

    /// Replace the content, bumping `updated_at`
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Validate and normalize raw comment input.
    ///
    /// Rules: trimmed content must be non-empty, at most
    /// [`MAX_COMMENT_LEN`] characters, and must not contain HTML tags.
    /// Tag-bearing input is rejected rather than silently cleaned, so the
    /// stored text is always exactly what the author submitted.
    pub fn validate_content(raw: &str) -> Result<String, DomainError> {
        let trimmed = raw.trim();

        if strip_tags(trimmed) != trimmed {
            return Err(DomainError::ContentContainsMarkup);
        }
        if trimmed.is_empty() {
            return Err(DomainError::EmptyContent);
        }
        if trimmed.chars().count() > MAX_COMMENT_LEN {
            return Err(DomainError::ContentTooLong {
                max: MAX_COMMENT_LEN,
            });
        }

        Ok(trimmed.to_string())
    }
}

/// Remove HTML/XML tags from a string.
///
/// A tag starts at `<` immediately followed by an ASCII letter, `/` or `!`
/// and runs through the next `>`. A bare `<` (as in "1 < 2") is kept.
/// An unterminated tag is stripped to the end of the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '<' {
            match chars.peek() {
                Some(&next) if next.is_ascii_alphabetic() || next == '/' || next == '!' => {
                    // Consume through the closing '>'
                    for inner in chars.by_ref() {
                        if inner == '>' {
                            break;
                        }
                    }
                }
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }

    out
}
