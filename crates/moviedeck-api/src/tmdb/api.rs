//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::TmdbError;
use super::types::{
    DiscoverMovieParams, MovieDetailsParams, SearchMovieParams, TmdbMovieDetails,
    TmdbMovieListResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Browses movies in TMDB's default ordering (`discover/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the HTTP request
    /// fails or times out, or the JSON body cannot be decoded.
    async fn discover_movies(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbMovieListResponse, TmdbError>;

    /// Searches movies by title (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the HTTP request
    /// fails or times out, or the JSON body cannot be decoded.
    async fn search_movies(
        &self,
        params: &SearchMovieParams,
    ) -> Result<TmdbMovieListResponse, TmdbError>;

    /// Fetches a single movie with any appended sub-resources (`movie/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is missing, the HTTP request
    /// fails or times out, or the JSON body cannot be decoded.
    async fn movie_details(&self, params: &MovieDetailsParams)
    -> Result<TmdbMovieDetails, TmdbError>;
}
