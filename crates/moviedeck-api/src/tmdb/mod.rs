//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and decodes list and detail payloads.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbError;
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DiscoverMovieParams, MovieDetailsParams, SearchMovieParams, TmdbAuthorDetails,
    TmdbCastMember, TmdbCredits, TmdbCrewMember, TmdbErrorResponse, TmdbGenre, TmdbImage,
    TmdbImages, TmdbMovieDetails, TmdbMovieListItem, TmdbMovieListResponse, TmdbResults,
    TmdbReview, TmdbVideo,
};
