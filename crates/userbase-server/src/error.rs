//! Process-level errors for the `userbase` binary.
//!
//! Request-level errors live in [`crate::http::error`]; this type covers
//! what can go wrong before or around serving: configuration, binding,
//! backend connection.

use std::error::Error as _;

use thiserror::Error;

use userbase_core::error::{ErrorCategory, UserbaseError};

/// Result type alias for server startup and commands.
pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be read, parsed, or validated.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<config::ConfigError>,
    },

    /// The listener could not be bound.
    #[error("Failed to bind {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// An error propagated from the core or a storage adapter.
    #[error(transparent)]
    Core(#[from] UserbaseError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Config {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ServerError {
    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | Usage         |  2   |
    /// | Configuration |  4   |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config { .. } => 4,
            Self::Core(core) => match core.category() {
                ErrorCategory::Configuration => 4,
                ErrorCategory::Validation => 2,
                _ => 1,
            },
            Self::Bind { .. } | Self::Io { .. } => 1,
        }
    }

    /// Plain-text rendering with the source chain.
    pub fn format_plain(&self) -> String {
        let mut out = format!("Error: {self}\n");
        let mut source = self.source();
        while let Some(err) = source {
            out.push_str(&format!("  Caused by: {err}\n"));
            source = err.source();
        }
        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.exit_code() {
            4 => tracing::error!("Configuration error: {}", self),
            _ => tracing::error!("Fatal: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}
