//! Error types for the query API.
//!
//! [`ApiError`] unifies load and query failures into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use iss_data::{LoadError, QueryError};
use tracing::{error, warn};

/// Errors that can occur in the query API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A lookup failed (not loaded, bad index, or no matching records).
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The source documents could not be loaded.
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] LoadError),

    /// A serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Query(QueryError::NotLoaded) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Query(QueryError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            Self::Query(QueryError::IndexOutOfRange { .. } | QueryError::NotFound { .. }) => {
                StatusCode::NOT_FOUND
            }
            Self::DataUnavailable(_) | Self::Serialization(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Query(QueryError::NotFound { level, name }) => {
                warn!(%level, name = name.as_str(), "no sightings matched");
            }
            Self::DataUnavailable(e) => error!(error = %e, "failed to load data"),
            Self::Serialization(_) | Self::Internal(_) => error!(error = %self, "request failed"),
            Self::Query(_) => warn!(error = %self, "rejected query"),
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
