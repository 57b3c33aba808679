//! `TmdbClient` - TMDB API client implementation.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::error::TmdbError;
use super::types::{
    DiscoverMovieParams, MovieDetailsParams, SearchMovieParams, TmdbMovieDetails,
    TmdbMovieListResponse,
};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key sent as the `api_key` query parameter.
    api_key: Option<String>,
    /// Per-request timeout (also applied by `http_client`).
    timeout: Duration,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key.
    ///
    /// The client can be built without one; every request then fails
    /// with [`TmdbError::MissingCredential`] before touching the network.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API key from an optional value.
    #[must_use]
    pub fn maybe_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key: self.api_key,
            timeout,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns `true` if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Classifies a reqwest failure as timeout or transport error.
    fn request_error(&self, path: &str, source: reqwest::Error) -> TmdbError {
        if source.is_timeout() {
            TmdbError::Timeout {
                path: String::from(path),
                timeout: self.timeout,
            }
        } else {
            TmdbError::Transport {
                path: String::from(path),
                source,
            }
        }
    }

    /// Sends a GET request with the `api_key` credential and query params.
    ///
    /// Fails with [`TmdbError::MissingCredential`] before any network
    /// call when no key is configured. No retries are attempted.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TmdbError::MissingCredential)?;

        let url = self.base_url.join(path).map_err(|source| TmdbError::Url {
            path: String::from(path),
            source,
        })?;

        // The credential is kept out of the logged query.
        tracing::debug!(url = %url, query = ?query, "TMDB API request");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .map_err(|e| self.request_error(path, e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::debug!(status = status.as_u16(), "TMDB API error response");
            return Err(TmdbError::from_response(status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.request_error(path, e))?;
        serde_json::from_str(&body).map_err(|source| TmdbError::Decode {
            path: String::from(path),
            source,
        })
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(page = params.page))]
    async fn discover_movies(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbMovieListResponse, TmdbError> {
        let query = [
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json("discover/movie", &query).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn search_movies(
        &self,
        params: &SearchMovieParams,
    ) -> Result<TmdbMovieListResponse, TmdbError> {
        let query = [
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = %params.movie_id))]
    async fn movie_details(
        &self,
        params: &MovieDetailsParams,
    ) -> Result<TmdbMovieDetails, TmdbError> {
        let path = format!("movie/{}", params.movie_id);
        self.get_json(&path, &params.to_query()).await
    }
}
