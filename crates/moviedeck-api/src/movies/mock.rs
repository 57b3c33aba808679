//! In-memory `TmdbApi` used by the service tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::as_conversions)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::tmdb::{
    DiscoverMovieParams, MovieDetailsParams, SearchMovieParams, TmdbApi, TmdbError,
    TmdbMovieDetails, TmdbMovieListItem, TmdbMovieListResponse,
};

/// Mock API serving a synthetic catalog and canned detail responses.
///
/// The catalog holds movies with IDs `1..=total_results`, split into
/// upstream pages of `upstream_page_size`.
pub(crate) struct MockTmdbApi {
    total_results: u64,
    upstream_page_size: u32,
    pub(crate) discover_calls: AtomicU32,
    pub(crate) search_calls: AtomicU32,
    pub(crate) detail_calls: AtomicU32,
    pub(crate) list_requests: Mutex<Vec<(Option<String>, u32, String)>>,
    pub(crate) detail_requests: Mutex<Vec<MovieDetailsParams>>,
    /// Locale -> canned detail response or upstream status.
    details: BTreeMap<String, Result<TmdbMovieDetails, u16>>,
    missing_credential: bool,
}

impl MockTmdbApi {
    pub(crate) fn new(total_results: u64, upstream_page_size: u32) -> Self {
        Self {
            total_results,
            upstream_page_size,
            discover_calls: AtomicU32::new(0),
            search_calls: AtomicU32::new(0),
            detail_calls: AtomicU32::new(0),
            list_requests: Mutex::new(Vec::new()),
            detail_requests: Mutex::new(Vec::new()),
            details: BTreeMap::new(),
            missing_credential: false,
        }
    }

    /// Mock with no catalog, for detail tests.
    pub(crate) fn empty() -> Self {
        Self::new(0, 20)
    }

    /// Serves `details` for requests in `locale`.
    pub(crate) fn with_detail(mut self, locale: &str, details: TmdbMovieDetails) -> Self {
        self.details.insert(String::from(locale), Ok(details));
        self
    }

    /// Fails requests in `locale` with an upstream status.
    pub(crate) fn with_detail_status(mut self, locale: &str, status: u16) -> Self {
        self.details.insert(String::from(locale), Err(status));
        self
    }

    /// Fails every call like a client without an API key.
    pub(crate) fn without_credential(mut self) -> Self {
        self.missing_credential = true;
        self
    }

    pub(crate) fn requested_pages(&self) -> Vec<u32> {
        self.list_requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, page, _)| *page)
            .collect()
    }

    fn page(&self, page: u32) -> TmdbMovieListResponse {
        let size = u64::from(self.upstream_page_size);
        let start = u64::from(page.saturating_sub(1)) * size + 1;
        let end = (start + size - 1).min(self.total_results);
        let results = (start..=end)
            .map(|id| TmdbMovieListItem {
                id,
                title: Some(format!("Movie {id}")),
                poster_path: Some(format!("/poster_{id}.jpg")),
                release_date: Some(String::from("2000-01-01")),
                vote_average: Some(7.0),
            })
            .collect();
        TmdbMovieListResponse {
            page,
            results,
            total_pages: self.total_results.div_ceil(size) as u32,
            total_results: self.total_results,
        }
    }
}

impl TmdbApi for MockTmdbApi {
    async fn discover_movies(
        &self,
        params: &DiscoverMovieParams,
    ) -> Result<TmdbMovieListResponse, TmdbError> {
        if self.missing_credential {
            return Err(TmdbError::MissingCredential);
        }
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        self.list_requests
            .lock()
            .unwrap()
            .push((None, params.page, params.language.clone()));
        Ok(self.page(params.page))
    }

    async fn search_movies(
        &self,
        params: &SearchMovieParams,
    ) -> Result<TmdbMovieListResponse, TmdbError> {
        if self.missing_credential {
            return Err(TmdbError::MissingCredential);
        }
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.list_requests.lock().unwrap().push((
            Some(params.query.clone()),
            params.page,
            params.language.clone(),
        ));
        Ok(self.page(params.page))
    }

    async fn movie_details(
        &self,
        params: &MovieDetailsParams,
    ) -> Result<TmdbMovieDetails, TmdbError> {
        if self.missing_credential {
            return Err(TmdbError::MissingCredential);
        }
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail_requests.lock().unwrap().push(params.clone());
        match self.details.get(&params.language) {
            Some(Ok(details)) => Ok(details.clone()),
            Some(Err(status)) => Err(TmdbError::Status {
                status: *status,
                message: format!("TMDB API error (HTTP {status})"),
            }),
            None => Err(TmdbError::Status {
                status: 404,
                message: String::from("The resource you requested could not be found."),
            }),
        }
    }
}

/// Parses a detail fixture.
pub(crate) fn detail_fixture(json: &str) -> TmdbMovieDetails {
    serde_json::from_str(json).unwrap()
}
