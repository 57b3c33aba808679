//! TMDB client and movie aggregation library for moviedeck.
//!
//! Provides the TMDB API client, the locale resolver, and the movie
//! service that remaps pagination and normalizes movie details.

/// Language code to TMDB locale resolution.
pub mod locale;

/// Movie list and detail aggregation.
pub mod movies;

/// TMDB API client.
pub mod tmdb;
