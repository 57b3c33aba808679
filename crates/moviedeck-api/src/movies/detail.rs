//! Movie detail aggregation with default-locale overview fallback.

use tracing::{debug, instrument, warn};

use super::MovieService;
use super::error::MovieError;
use super::models::{Genre, MovieDetail, MovieImages};
use crate::locale::UpstreamLocale;
use crate::tmdb::{MovieDetailsParams, TmdbApi, TmdbError, TmdbMovieDetails};

/// Sub-resources appended to the primary detail request.
const APPENDED_RESOURCES: [&str; 4] = ["credits", "videos", "reviews", "images"];

/// Asset language tag TMDB uses for untagged images and videos.
const UNTAGGED_ASSETS: &str = "null";

/// Caps on detail collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailLimits {
    /// Maximum reviews kept.
    pub reviews: usize,
    /// Maximum backdrops kept.
    pub backdrops: usize,
    /// Maximum posters kept.
    pub posters: usize,
}

impl Default for DetailLimits {
    fn default() -> Self {
        Self {
            reviews: 5,
            backdrops: 12,
            posters: 8,
        }
    }
}

/// Outcome of the default-locale overview fallback.
#[derive(Debug)]
pub enum OverviewFallback {
    /// The primary overview was usable, or the request already used the
    /// default locale.
    NotNeeded,
    /// The default-locale overview replaced the blank one.
    Applied(String),
    /// The default-locale overview was blank too.
    Empty,
    /// The fallback request failed; the blank overview is kept.
    Failed(TmdbError),
}

impl OverviewFallback {
    /// Logs the outcome for `movie_id`.
    pub fn log(&self, movie_id: &str) {
        match self {
            Self::NotNeeded => {}
            Self::Applied(_) => debug!(movie_id, "Applied default-locale overview"),
            Self::Empty => debug!(movie_id, "Default-locale overview is blank"),
            Self::Failed(error) => {
                warn!(movie_id, error = %error, "Overview fallback failed");
            }
        }
    }

    /// Replacement overview, if one was found.
    #[must_use]
    pub fn into_overview(self) -> Option<String> {
        match self {
            Self::Applied(overview) => Some(overview),
            Self::NotNeeded | Self::Empty | Self::Failed(_) => None,
        }
    }
}

impl<A: TmdbApi + Sync> MovieService<A> {
    /// Returns the aggregated detail for one movie.
    ///
    /// Issues one `movie/{id}` request with credits, videos, reviews and
    /// images appended. When the localized overview is blank and the
    /// locale is not the default, a second request in the default locale
    /// supplies the overview; its failure is logged and ignored.
    ///
    /// `movie_id` is passed to TMDB as-is.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if TMDB reports 404, or
    /// [`MovieError::Upstream`] for any other failure of the primary request.
    #[instrument(skip_all, fields(movie_id = movie_id))]
    pub async fn get_movie_detail(
        &self,
        movie_id: &str,
        language: Option<&str>,
    ) -> Result<MovieDetail, MovieError> {
        let locale = self.locales.resolve(language);
        debug!(locale = %locale, "Fetching movie detail");

        let params = MovieDetailsParams::new(movie_id)
            .language(locale.as_str())
            .append_to_response(APPENDED_RESOURCES)
            .asset_languages(self.asset_languages(&locale));
        let details = self
            .api
            .movie_details(&params)
            .await
            .map_err(|error| MovieError::from_detail(movie_id, error))?;

        let fallback = self
            .overview_fallback(movie_id, &locale, details.overview.as_deref())
            .await;
        fallback.log(movie_id);

        let mut detail = normalize(details, self.limits);
        if let Some(overview) = fallback.into_overview() {
            detail.overview = overview;
        }
        Ok(detail)
    }

    /// Resolved language, default language, then untagged assets.
    fn asset_languages(&self, locale: &UpstreamLocale) -> Vec<String> {
        let mut languages = vec![String::from(locale.language())];
        let default = self.locales.default_locale().language();
        if default != locale.language() {
            languages.push(String::from(default));
        }
        languages.push(String::from(UNTAGGED_ASSETS));
        languages
    }

    /// Fetches the default-locale overview when the localized one is blank.
    async fn overview_fallback(
        &self,
        movie_id: &str,
        locale: &UpstreamLocale,
        overview: Option<&str>,
    ) -> OverviewFallback {
        let blank = overview.is_none_or(|text| text.trim().is_empty());
        if !blank || self.locales.is_default(locale) {
            return OverviewFallback::NotNeeded;
        }

        let params =
            MovieDetailsParams::new(movie_id).language(self.locales.default_locale().as_str());
        match self.api.movie_details(&params).await {
            Ok(details) => match details.overview {
                Some(text) if !text.trim().is_empty() => OverviewFallback::Applied(text),
                _ => OverviewFallback::Empty,
            },
            Err(error) => OverviewFallback::Failed(error),
        }
    }
}

/// Narrows a TMDB detail payload and applies collection caps.
fn normalize(details: TmdbMovieDetails, limits: DetailLimits) -> MovieDetail {
    let credits = details.credits.unwrap_or_default();
    let images = details.images.unwrap_or_default();

    MovieDetail {
        id: details.id,
        title: details.title.unwrap_or_default(),
        overview: details.overview.unwrap_or_default(),
        runtime: details.runtime.unwrap_or_default(),
        release_date: details.release_date.unwrap_or_default(),
        vote_average: details.vote_average.unwrap_or_default(),
        poster_path: details.poster_path,
        backdrop_path: details.backdrop_path,
        genres: details
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(Genre::from)
            .collect(),
        homepage: details.homepage.unwrap_or_default(),
        status: details.status.unwrap_or_default(),
        tagline: details.tagline.unwrap_or_default(),
        cast: credits.cast.into_iter().map(Into::into).collect(),
        crew: credits.crew.into_iter().map(Into::into).collect(),
        videos: details
            .videos
            .map(|videos| videos.results)
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect(),
        reviews: details
            .reviews
            .map(|reviews| reviews.results)
            .unwrap_or_default()
            .into_iter()
            .take(limits.reviews)
            .map(Into::into)
            .collect(),
        images: MovieImages {
            backdrops: images
                .backdrops
                .into_iter()
                .take(limits.backdrops)
                .map(Into::into)
                .collect(),
            posters: images
                .posters
                .into_iter()
                .take(limits.posters)
                .map(Into::into)
                .collect(),
        },
    }
}
