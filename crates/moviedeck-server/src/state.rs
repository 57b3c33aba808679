//! Shared application state.

use std::sync::Arc;

use anyhow::{Context, Result};
use moviedeck_api::movies::MovieService;
use moviedeck_api::tmdb::TmdbClient;
use tracing::{instrument, warn};

use crate::config::AppConfig;

/// State shared by all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Movie list and detail flows.
    pub movies: Arc<MovieService<TmdbClient>>,
}

impl AppState {
    /// Wraps a movie service.
    pub fn new(movies: MovieService<TmdbClient>) -> Self {
        Self {
            movies: Arc::new(movies),
        }
    }

    /// Builds the TMDB client and movie service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured value is invalid or the HTTP
    /// client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(build_movie_service(config)?))
    }
}

/// Builds the movie service from configuration.
///
/// A missing API key is not an error here; every TMDB call then fails
/// with a configuration error instead.
///
/// # Errors
///
/// Returns an error if a configured value is invalid or the HTTP client
/// fails to build.
#[instrument(skip_all)]
pub fn build_movie_service(config: &AppConfig) -> Result<MovieService<TmdbClient>> {
    let client = TmdbClient::builder()
        .base_url(config.base_url()?)
        .maybe_api_key(config.api_key())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(config.timeout())
        .build()
        .context("failed to build TMDB client")?;

    if !client.has_api_key() {
        warn!("TMDB_API_KEY is not set; movie requests will fail until it is configured");
    }

    Ok(MovieService::new(client)
        .with_locales(config.locale_resolver())
        .with_page_sizes(config.page_sizes()?)
        .with_limits(config.detail_limits()))
}
