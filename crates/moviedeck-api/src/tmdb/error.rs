//! Error types for TMDB API operations.

use std::time::Duration;

use thiserror::Error;

use super::types::TmdbErrorResponse;

/// Errors from TMDB API operations.
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// No API key was configured; raised before any network call.
    #[error("TMDB API key is not configured")]
    MissingCredential,

    /// The request exceeded the client timeout.
    #[error("TMDB request timed out after {}s: {path}", timeout.as_secs())]
    Timeout {
        /// Endpoint path.
        path: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// TMDB answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status returned by TMDB.
        status: u16,
        /// `status_message` from the error body, or a generic message.
        message: String,
    },

    /// Connection or protocol failure other than a timeout.
    #[error("TMDB request failed: {path}")]
    Transport {
        /// Endpoint path.
        path: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode TMDB response: {path}")]
    Decode {
        /// Endpoint path.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The endpoint path could not be joined onto the base URL.
    #[error("failed to join URL path: {path}")]
    Url {
        /// Endpoint path.
        path: String,
        /// Underlying URL error.
        #[source]
        source: url::ParseError,
    },
}

impl TmdbError {
    /// Builds a `Status` error from a non-success response body.
    ///
    /// Uses TMDB's `status_message` when the body carries one.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<TmdbErrorResponse>(body)
            .ok()
            .and_then(|error| error.status_message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("TMDB API error (HTTP {status})"));
        Self::Status { status, message }
    }

    /// Returns `true` if TMDB reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// HTTP status this error should surface with.
    ///
    /// Upstream statuses pass through unchanged; timeouts map to 504,
    /// transport and decoding failures to 502, everything else to 500.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Timeout { .. } => 504,
            Self::Transport { .. } | Self::Decode { .. } => 502,
            Self::MissingCredential | Self::Url { .. } => 500,
        }
    }
}
