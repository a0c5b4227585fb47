//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
///
/// Authorization, not-found and invalid-type conditions are generally
/// absorbed as silent no-ops at the store/controller boundary; the
/// variants exist so repository implementations can report them uniformly.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authentication
    // =========================================================================
    #[error("Authentication required")]
    AuthenticationRequired,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Comment content must not be empty")]
    EmptyContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Comment contains invalid characters or HTML tags")]
    ContentContainsMarkup,

    // =========================================================================
    // Authorization / Not Found
    // =========================================================================
    #[error("Not the comment author")]
    NotCommentAuthor,

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    // =========================================================================
    // Reaction Rules
    // =========================================================================
    #[error("Unknown reaction type: {0}")]
    InvalidReactionType(String),

    #[error("Reaction type vetoed by entity: {0}")]
    ReactionVetoed(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for structured reporting
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::ContentContainsMarkup => "CONTENT_CONTAINS_MARKUP",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",
            Self::ReactionVetoed(_) => "REACTION_VETOED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyContent
                | Self::ContentTooLong { .. }
                | Self::ContentContainsMarkup
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationRequired)
    }

    /// Conditions the controllers absorb as "nothing happened" rather than
    /// surface to the view (avoids leaking existence/ownership information)
    pub fn is_silent_no_op(&self) -> bool {
        matches!(
            self,
            Self::NotCommentAuthor
                | Self::CommentNotFound(_)
                | Self::InvalidReactionType(_)
                | Self::ReactionVetoed(_)
        )
    }
}
