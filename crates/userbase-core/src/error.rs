//! Unified error handling for Userbase Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors. Adapters and the HTTP layer only ever see [`UserbaseError`].

use std::fmt::Display;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Userbase Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserbaseError {
    /// Errors from the domain layer (business rule violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (storage failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl UserbaseError {
    /// Shorthand for a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get error category, used by the transport layer to pick a status.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Unavailable,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Unavailable => "unavailable",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        }
    }
}

/// Convenient result type alias.
pub type UserbaseResult<T> = Result<T, UserbaseError>;

/// Extension trait turning foreign storage errors into
/// [`ApplicationError::StorageUnavailable`].
pub trait StorageContext<T> {
    /// Tag the error with the backend name and the action that failed.
    fn storage_context(self, backend: &'static str, action: &str) -> UserbaseResult<T>;
}

impl<T, E> StorageContext<T> for Result<T, E>
where
    E: Display,
{
    fn storage_context(self, backend: &'static str, action: &str) -> UserbaseResult<T> {
        self.map_err(|e| {
            ApplicationError::StorageUnavailable {
                backend,
                reason: format!("failed to {action}: {e}"),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_not_found_maps_to_not_found() {
        let err: UserbaseError = DomainError::UserNotFound { id: "u1".into() }.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn duplicate_maps_to_conflict() {
        let err: UserbaseError = DomainError::UserAlreadyExists { id: "u1".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn storage_context_wraps_as_unavailable() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
        let err = result.storage_context("file", "read users").unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Unavailable);
        assert!(err.to_string().contains("read users"));
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn category_strings_are_snake_case() {
        assert_eq!(ErrorCategory::NotFound.as_str(), "not_found");
        assert_eq!(ErrorCategory::Unavailable.as_str(), "unavailable");
    }
}
