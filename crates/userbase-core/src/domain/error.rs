use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so repositories can hand them back through shared state)
/// - Categorizable (for the HTTP status mapping)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid user id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("Invalid {field}: {reason}")]
    InvalidUser { field: &'static str, reason: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("User '{id}' not found")]
    UserNotFound { id: String },

    // ========================================================================
    // Conflicts (409-level equivalent)
    // ========================================================================
    #[error("User '{id}' already exists")]
    UserAlreadyExists { id: String },
}

impl DomainError {
    /// Error category for the transport layer.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidId { .. } | Self::InvalidUser { .. } => ErrorCategory::Validation,
            Self::UserNotFound { .. } => ErrorCategory::NotFound,
            Self::UserAlreadyExists { .. } => ErrorCategory::Conflict,
        }
    }

    pub(crate) fn invalid_user(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidUser {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
}
