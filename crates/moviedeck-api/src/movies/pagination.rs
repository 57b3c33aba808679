//! Application page windows over TMDB's fixed-size result pages.

use std::num::{NonZeroU32, NonZeroU64};

use tracing::{debug, instrument};

use super::MovieService;
use super::error::MovieError;
use super::models::{MovieSummary, MoviesPage};
use crate::locale::UpstreamLocale;
use crate::tmdb::{DiscoverMovieParams, SearchMovieParams, TmdbApi, TmdbMovieListResponse};

/// Default number of movies per application page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// TMDB's number of movies per list page.
pub const DEFAULT_UPSTREAM_PAGE_SIZE: u32 = 20;

/// A validated 1-based application page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// Page 1.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Wraps a page number, rejecting 0.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        match NonZeroU32::new(page) {
            Some(page) => Some(Self(page)),
            None => None,
        }
    }

    /// Page number as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Parses a raw query value.
    ///
    /// Accepts decimal digits only, surrounded by optional whitespace.
    /// Signs, fractions and exponents are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::InvalidPage`] carrying the raw value if it is
    /// not an integer >= 1.
    pub fn parse(raw: &str) -> Result<Self, MovieError> {
        let digits = raw.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MovieError::InvalidPage(String::from(raw)));
        }
        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| MovieError::InvalidPage(String::from(raw)))
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Application and upstream page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    page_size: NonZeroU32,
    upstream_page_size: NonZeroU32,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            upstream_page_size: NonZeroU32::new(DEFAULT_UPSTREAM_PAGE_SIZE)
                .unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Slice of the upstream result sequence backing one application page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Upstream page holding the window's first item.
    pub upstream_page: u32,
    /// Index of the first item within `upstream_page`.
    pub offset: usize,
    /// Number of items in a full window.
    pub length: usize,
    /// Upstream page holding the window's last item.
    pub last_upstream_page: u32,
}

impl PageSizes {
    /// Creates page sizes, returning `None` if either is 0.
    #[must_use]
    pub const fn new(page_size: u32, upstream_page_size: u32) -> Option<Self> {
        match (
            NonZeroU32::new(page_size),
            NonZeroU32::new(upstream_page_size),
        ) {
            (Some(page_size), Some(upstream_page_size)) => Some(Self {
                page_size,
                upstream_page_size,
            }),
            _ => None,
        }
    }

    /// Movies per application page.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size.get()
    }

    /// Movies per upstream page.
    #[must_use]
    pub const fn upstream_page_size(self) -> u32 {
        self.upstream_page_size.get()
    }

    /// Computes the upstream window for an application page.
    ///
    /// With `P = 10, U = 20` this is `upstream_page = ceil(page * P / U)`
    /// and `offset = ((page - 1) * P) mod U`. The general form locates the
    /// window's first item, so any ratio of sizes works, including pages
    /// spanning more than two upstream pages.
    #[must_use]
    pub fn window(self, page: PageNumber) -> PageWindow {
        let page_size = u64::from(self.page_size.get());
        let upstream_size = NonZeroU64::from(self.upstream_page_size);

        // (2^32 - 1)^2 + 2^32 fits in u64.
        let start = u64::from(page.get().saturating_sub(1)).saturating_mul(page_size);
        let end = start.saturating_add(page_size.saturating_sub(1));

        PageWindow {
            upstream_page: to_page(start / upstream_size),
            offset: usize::try_from(start % upstream_size).unwrap_or(usize::MAX),
            length: usize::try_from(page_size).unwrap_or(usize::MAX),
            last_upstream_page: to_page(end / upstream_size),
        }
    }

    /// Application page count for an upstream result total.
    #[must_use]
    pub fn total_pages(self, total_results: u64) -> u64 {
        total_results.div_ceil(u64::from(self.page_size.get()))
    }
}

/// Converts a 0-based upstream page index to a 1-based page number.
fn to_page(index: u64) -> u32 {
    u32::try_from(index.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Which TMDB list endpoint serves a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListSource {
    /// `discover/movie`, TMDB's default ordering.
    Discover,
    /// `search/movie` with the trimmed query.
    Search(String),
}

impl ListSource {
    /// Selects the endpoint for a search term.
    ///
    /// A blank term browses; anything else searches with the trimmed text.
    #[must_use]
    pub fn from_search(search: &str) -> Self {
        let search = search.trim();
        if search.is_empty() {
            Self::Discover
        } else {
            Self::Search(String::from(search))
        }
    }
}

/// A validated list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListMoviesRequest {
    /// Requested application page.
    pub page: PageNumber,
    /// Search term, trimmed; empty browses.
    pub search: String,
    /// Application language code.
    pub language: Option<String>,
}

impl ListMoviesRequest {
    /// Creates a browse request for `page`.
    #[must_use]
    pub fn new(page: PageNumber) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn search(mut self, search: &str) -> Self {
        self.search = String::from(search.trim());
        self
    }

    /// Sets the application language code.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds a request from raw query values.
    ///
    /// An absent page means page 1.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::InvalidPage`] if `page` is present but not an
    /// integer >= 1.
    pub fn from_query(
        page: Option<&str>,
        search: Option<&str>,
        language: Option<&str>,
    ) -> Result<Self, MovieError> {
        let page = page.map_or(Ok(PageNumber::FIRST), PageNumber::parse)?;
        let mut request = Self::new(page).search(search.unwrap_or_default());
        request.language = language.map(String::from);
        Ok(request)
    }

    /// Endpoint serving this request.
    #[must_use]
    pub fn source(&self) -> ListSource {
        ListSource::from_search(&self.search)
    }
}

impl<A: TmdbApi + Sync> MovieService<A> {
    /// Returns one application page of movies.
    ///
    /// Fetches the upstream page holding the window start, then following
    /// upstream pages while the window is short and TMDB has more. No
    /// request is retried.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Upstream`] if any upstream request fails.
    #[instrument(skip_all, fields(page = request.page.get(), search = %request.search))]
    pub async fn list_movies(&self, request: &ListMoviesRequest) -> Result<MoviesPage, MovieError> {
        let locale = self.locales.resolve(request.language.as_deref());
        let source = request.source();
        let window = self.page_sizes.window(request.page);
        debug!(
            locale = %locale,
            upstream_page = window.upstream_page,
            offset = window.offset,
            last_upstream_page = window.last_upstream_page,
            "Resolved list window"
        );

        let first = self
            .fetch_list(&source, window.upstream_page, &locale)
            .await?;
        let total_results = first.total_results;
        let upstream_total_pages = first.total_pages;

        let mut results: Vec<MovieSummary> = first
            .results
            .into_iter()
            .skip(window.offset)
            .map(MovieSummary::from)
            .collect();

        let mut next = window.upstream_page;
        while results.len() < window.length && next < window.last_upstream_page {
            next = next.saturating_add(1);
            if next > upstream_total_pages {
                break;
            }
            let response = self.fetch_list(&source, next, &locale).await?;
            if response.results.is_empty() {
                break;
            }
            results.extend(response.results.into_iter().map(MovieSummary::from));
        }
        results.truncate(window.length);

        Ok(MoviesPage {
            results,
            page: request.page.get(),
            total_pages: self.page_sizes.total_pages(total_results),
            total_results,
        })
    }

    /// Fetches one upstream list page.
    async fn fetch_list(
        &self,
        source: &ListSource,
        upstream_page: u32,
        locale: &UpstreamLocale,
    ) -> Result<TmdbMovieListResponse, MovieError> {
        let response = match source {
            ListSource::Discover => {
                let params = DiscoverMovieParams::new(upstream_page).language(locale.as_str());
                self.api.discover_movies(&params).await?
            }
            ListSource::Search(query) => {
                let params = SearchMovieParams::new(query.as_str())
                    .language(locale.as_str())
                    .page(upstream_page);
                self.api.search_movies(&params).await?
            }
        };
        Ok(response)
    }
}
