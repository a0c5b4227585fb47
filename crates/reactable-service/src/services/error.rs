//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use reactable_common::AppError;
use reactable_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error
    App(AppError),

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller failed to authenticate (the controllers turn
    /// this into a login-modal prompt)
    pub fn is_authentication(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_authentication(),
            Self::App(AppError::MissingAuth) => true,
            _ => false,
        }
    }

    /// Whether this condition is absorbed as "nothing happened" at the
    /// controller boundary (authorization, not-found, unknown type, veto)
    pub fn is_silent_no_op(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_silent_no_op(),
            _ => false,
        }
    }

    /// Get the error code for structured reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_detection() {
        let err = ServiceError::from(DomainError::AuthenticationRequired);
        assert!(err.is_authentication());
        assert!(!err.is_silent_no_op());
    }

    #[test]
    fn test_conversion_to_app_error() {
        let app = AppError::from(ServiceError::internal("pool exhausted"));
        assert!(matches!(app, AppError::Internal(_)));
        assert_eq!(app.error_code(), "INTERNAL_ERROR");

        let app = AppError::from(ServiceError::validation("content required"));
        assert_eq!(app.error_code(), "VALIDATION_ERROR");

        let app = AppError::from(ServiceError::from(DomainError::EmptyContent));
        assert!(matches!(app, AppError::Domain(DomainError::EmptyContent)));
    }

    #[test]
    fn test_silent_no_op_detection() {
        let err = ServiceError::from(DomainError::InvalidReactionType("meh".into()));
        assert!(err.is_silent_no_op());
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("content required");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("content required"));
    }

    #[test]
    fn test_convert_to_app_error() {
        let service_err = ServiceError::from(DomainError::EmptyContent);
        let app_err: AppError = service_err.into();
        assert_eq!(app_err.error_code(), "EMPTY_CONTENT");
    }
}
