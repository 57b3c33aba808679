//! Error types for movie list and detail operations.

use thiserror::Error;

use crate::tmdb::TmdbError;

/// Errors from [`MovieService`](super::MovieService) operations.
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum MovieError {
    /// The `page` parameter is not an integer >= 1.
    #[error("Invalid page parameter: {0}")]
    InvalidPage(String),

    /// TMDB has no movie with this ID.
    #[error("{message}")]
    NotFound {
        /// Requested movie ID.
        movie_id: String,
        /// Message reported by TMDB.
        message: String,
    },

    /// The primary TMDB request failed.
    #[error(transparent)]
    Upstream(#[from] TmdbError),
}

impl MovieError {
    /// HTTP status this error should surface with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPage(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Upstream(error) => error.status_code(),
        }
    }

    /// Converts a detail-request failure, promoting TMDB 404s to `NotFound`.
    pub(crate) fn from_detail(movie_id: &str, error: TmdbError) -> Self {
        match error {
            TmdbError::Status {
                status: 404,
                message,
            } => Self::NotFound {
                movie_id: String::from(movie_id),
                message,
            },
            other => Self::Upstream(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_page_message_contains_value() {
        // Arrange & Act
        let error = MovieError::InvalidPage(String::from("1.5"));

        // Assert
        assert_eq!(error.to_string(), "Invalid page parameter: 1.5");
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_from_detail_promotes_not_found() {
        // Arrange
        let upstream = TmdbError::Status {
            status: 404,
            message: String::from("The resource you requested could not be found."),
        };

        // Act
        let error = MovieError::from_detail("42", upstream);

        // Assert
        assert!(matches!(error, MovieError::NotFound { ref movie_id, .. } if movie_id == "42"));
        assert_eq!(error.status_code(), 404);
    }

    #[test]
    fn test_from_detail_keeps_other_statuses() {
        // Arrange
        let upstream = TmdbError::Status {
            status: 401,
            message: String::from("Invalid API key"),
        };

        // Act
        let error = MovieError::from_detail("42", upstream);

        // Assert
        assert!(matches!(error, MovieError::Upstream(_)));
        assert_eq!(error.status_code(), 401);
    }

    #[test]
    fn test_missing_credential_is_server_error() {
        // Arrange & Act
        let error = MovieError::from(TmdbError::MissingCredential);

        // Assert
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.to_string(), "TMDB API key is not configured");
    }
}
