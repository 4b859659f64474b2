//! Error types for the lookup service
//!
//! Provides unified error handling using thiserror. The cache never produces
//! these; they originate in the upstream client and request validation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Lookup Error Enum ==
/// Unified error type for the lookup service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Missing or malformed input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream has no country by that name
    #[error("Country not found: {0}")]
    NotFound(String),

    /// Upstream did not answer within the client timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// Upstream unreachable or answered with an unexpected status
    #[error("External API failure: {0}")]
    Upstream(String),

    /// Anything else, e.g. an unparsable upstream body
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            LookupError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid request", msg.clone())
            }
            LookupError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "Not found",
                "Country not found".to_string(),
            ),
            LookupError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "Timeout",
                "Request to external service timed out".to_string(),
            ),
            LookupError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "Service unavailable",
                "External service is unavailable".to_string(),
            ),
            LookupError::Internal(_) => {
                error!(error = %self, "Unexpected error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(error, message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup service.
pub type Result<T> = std::result::Result<T, LookupError>;
