//! Movie list and detail flows.
//!
//! [`MovieService`] wraps a [`TmdbApi`](crate::tmdb::TmdbApi)
//! implementation and turns TMDB responses into the normalized models
//! served to the UI: 10-per-page list windows over TMDB's 20-per-page
//! results, and aggregated movie details with an overview fallback.

mod detail;
mod error;
#[cfg(test)]
mod mock;
mod models;
mod pagination;

pub use detail::{DetailLimits, OverviewFallback};
#[allow(clippy::module_name_repetitions)]
pub use error::MovieError;
#[allow(clippy::module_name_repetitions)]
pub use models::{
    AuthorDetails, CastMember, CrewMember, Genre, Image, MovieDetail, MovieImages, MovieSummary,
    MoviesPage, Review, Video,
};
pub use pagination::{ListMoviesRequest, ListSource, PageNumber, PageSizes, PageWindow};

use crate::locale::LocaleResolver;

/// Movie flows over a TMDB API implementation.
///
/// Holds only immutable configuration; requests share nothing else.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct MovieService<A> {
    /// TMDB API implementation.
    api: A,
    /// Language code to locale table.
    locales: LocaleResolver,
    /// Application and upstream page sizes.
    page_sizes: PageSizes,
    /// Detail collection caps.
    limits: DetailLimits,
}

impl<A> MovieService<A> {
    /// Creates a service with the default locale table, page sizes and
    /// detail limits.
    pub fn new(api: A) -> Self {
        Self {
            api,
            locales: LocaleResolver::default(),
            page_sizes: PageSizes::default(),
            limits: DetailLimits::default(),
        }
    }

    /// Replaces the locale table.
    #[must_use]
    pub fn with_locales(mut self, locales: LocaleResolver) -> Self {
        self.locales = locales;
        self
    }

    /// Replaces the page sizes.
    #[must_use]
    pub const fn with_page_sizes(mut self, page_sizes: PageSizes) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    /// Replaces the detail collection caps.
    #[must_use]
    pub const fn with_limits(mut self, limits: DetailLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Underlying TMDB API implementation.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Locale table in use.
    pub const fn locales(&self) -> &LocaleResolver {
        &self.locales
    }

    /// Page sizes in use.
    pub const fn page_sizes(&self) -> PageSizes {
        self.page_sizes
    }
}
