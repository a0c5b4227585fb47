//! Application error types
//!
//! Unified error handling at the application edge. Inside the layer the
//! domain/service errors carry the semantics; `AppError` is what a host
//! embedding this crate reports outward.

use reactable_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication
    #[error("Missing authentication")]
    MissingAuth,

    // Validation
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resources
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database
    #[error("Database error: {0}")]
    Database(String),

    // Internal
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code for structured reporting
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuth => "MISSING_AUTH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this error is caused by the caller (bad input, missing
    /// auth) rather than the system
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        match self {
            Self::MissingAuth | Self::Validation(_) | Self::InvalidInput(_) | Self::NotFound(_) => {
                true
            }
            Self::Domain(e) => e.is_validation() || e.is_authentication() || e.is_silent_no_op(),
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => false,
        }
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Error response structure for structured reporting
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            details: None,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}
