//! JSON error envelope for HTTP responses.

use std::fmt;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moviedeck_api::movies::MovieError;
use serde_json::json;

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error rendered as `{ "error": { "status", "message" } }`.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Creates an error with the given status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404 with a generic message.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }

    /// 405 with a generic message.
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), message = %self.message, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "status": self.status.as_u16(),
                "message": self.message,
            }
        }));

        (self.status, body).into_response()
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        Self::new(err.status(), err.body_text())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::body::to_bytes;
    use moviedeck_api::tmdb::TmdbError;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_envelope_shape() {
        // Arrange
        let error = ApiError::from(MovieError::InvalidPage(String::from("abc")));

        // Act
        let response = error.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": {"status": 400, "message": "Invalid page parameter: abc"}})
        );
    }

    #[test]
    fn test_upstream_status_passes_through() {
        // Arrange
        let upstream = MovieError::Upstream(TmdbError::Status {
            status: 429,
            message: String::from("Your request count is over the allowed limit."),
        });

        // Act
        let error = ApiError::from(upstream);

        // Assert
        assert_eq!(error.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(error.message, "Your request count is over the allowed limit.");
    }

    #[test]
    fn test_invalid_upstream_status_becomes_server_error() {
        // Arrange
        let upstream = MovieError::Upstream(TmdbError::Status {
            status: 42,
            message: String::from("odd"),
        });

        // Act
        let error = ApiError::from(upstream);

        // Assert
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_credential_is_internal_error() {
        // Arrange & Act
        let error = ApiError::from(MovieError::Upstream(TmdbError::MissingCredential));

        // Assert
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "TMDB API key is not configured");
    }
}
