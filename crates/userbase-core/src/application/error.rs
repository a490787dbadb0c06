//! Application layer errors.
//!
//! These errors represent failures of the infrastructure behind a port, not
//! business rule violations. Business errors are `DomainError` from
//! `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while talking to a storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The backend could not be reached or refused the operation.
    #[error("{backend} storage unavailable: {reason}")]
    StorageUnavailable {
        backend: &'static str,
        reason: String,
    },

    /// The backend returned data that does not decode into a `User`.
    #[error("{backend} storage holds a corrupt record: {reason}")]
    CorruptRecord {
        backend: &'static str,
        reason: String,
    },
}

impl ApplicationError {
    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StorageUnavailable { .. } => ErrorCategory::Unavailable,
            Self::CorruptRecord { .. } => ErrorCategory::Internal,
        }
    }
}
