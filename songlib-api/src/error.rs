//! Error types for songlib-api
//!
//! Every failure reaches the client as `{"message": "..."}` with the matching
//! status code. Storage detail is logged, not returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::enrichment::EnrichmentError;
use crate::pagination::PaginationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed id, page, pageSize or body (400)
    #[error("{0}")]
    BadRequest(String),

    /// No song with the requested id (404)
    #[error("{0}")]
    NotFound(String),

    /// Metadata lookup failed (502 for transport/status, 500 for decode)
    #[error("Failed to enrich song data: {0}")]
    Enrichment(#[from] EnrichmentError),

    /// Store failure (500). `context` is what the client sees.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: songlib_common::Error,
    },
}

impl ApiError {
    /// Map a store error, keeping NotFound distinct from other failures
    pub fn from_store(context: &'static str, err: songlib_common::Error) -> Self {
        match err {
            songlib_common::Error::NotFound(what) => {
                ApiError::NotFound(format!("Song not found: {}", what))
            }
            source => ApiError::Storage { context, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Enrichment(EnrichmentError::UpstreamUnavailable(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Enrichment(EnrichmentError::Decode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }

        let message = match &self {
            ApiError::Storage { context, .. } => context.to_string(),
            ApiError::Enrichment(_) => "Failed to enrich song data".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from_store(
            "Error fetching song",
            songlib_common::Error::NotFound("song 4".to_string()),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err = ApiError::from_store(
            "Error creating song",
            songlib_common::Error::Database(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Error creating song"));
    }

    #[test]
    fn test_enrichment_status_codes() {
        let upstream = ApiError::from(EnrichmentError::UpstreamUnavailable("timeout".to_string()));
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let decode = ApiError::from(EnrichmentError::Decode("expected value".to_string()));
        assert_eq!(decode.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_pagination_error_is_bad_request() {
        let err = ApiError::from(PaginationError::InvalidPage("abc".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid page number: abc");
    }
}
