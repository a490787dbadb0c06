//! Mapping from failures to HTTP responses.
//!
//! Every error body has the same shape:
//!
//! ```json
//! { "error": "not_found", "message": "User 'u1' not found" }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use userbase_core::error::{ErrorCategory, UserbaseError};

/// Error returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] UserbaseError),

    /// The request body was not valid JSON for the expected shape.
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    /// The id segment of the URL could not be decoded, so it names no user.
    #[error("User not found: {0}")]
    Path(#[from] PathRejection),

    /// A lookup by id found nothing.
    #[error("User '{id}' not found")]
    NotFound { id: String },
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(err) => err.category(),
            Self::Body(_) => ErrorCategory::Validation,
            Self::Path(_) | Self::NotFound { .. } => ErrorCategory::NotFound,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Conflict => StatusCode::CONFLICT,
            ErrorCategory::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let category = self.category();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorBody {
            error: category.as_str(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
