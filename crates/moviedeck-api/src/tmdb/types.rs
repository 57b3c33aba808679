//! TMDB API response types and request parameters.
//!
//! Nullable or optional upstream fields are modeled as `Option` or with
//! `#[serde(default)]`; defaulting to display values happens during
//! normalization, not here.

use serde::Deserialize;

// --- Movie lists (discover / search) ---

/// Response from `discover/movie` and `search/movie` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current upstream page number.
    #[serde(default)]
    pub page: u32,
    /// Movies on this upstream page.
    #[serde(default)]
    pub results: Vec<TmdbMovieListItem>,
    /// Total upstream pages under TMDB's page size.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of matching movies.
    #[serde(default)]
    pub total_results: u64,
}

/// A single movie entry in a list response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Release date (YYYY-MM-DD, empty, or null).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
}

// --- Movie details ---

/// Response from `movie/{movie_id}` with `append_to_response`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Overview text in the requested language (often empty when untranslated).
    #[serde(default)]
    pub overview: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Release date.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Option<Vec<TmdbGenre>>,
    /// Official homepage URL.
    #[serde(default)]
    pub homepage: Option<String>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Appended `credits` sub-resource.
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    /// Appended `videos` sub-resource.
    #[serde(default)]
    pub videos: Option<TmdbResults<TmdbVideo>>,
    /// Appended `reviews` sub-resource.
    #[serde(default)]
    pub reviews: Option<TmdbResults<TmdbReview>>,
    /// Appended `images` sub-resource.
    #[serde(default)]
    pub images: Option<TmdbImages>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Generic `{ "results": [...] }` wrapper used by appended sub-resources.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbResults<T> {
    /// Entries.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Appended `credits` sub-resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    /// Cast members.
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

/// A cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    #[serde(default)]
    pub name: Option<String>,
    /// Character played.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order (0 = top billed).
    #[serde(default)]
    pub order: Option<u32>,
}

/// A crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    #[serde(default)]
    pub name: Option<String>,
    /// Job title (e.g., "Director").
    #[serde(default)]
    pub job: Option<String>,
    /// Department (e.g., "Directing").
    #[serde(default)]
    pub department: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A video (trailer, teaser, clip).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    /// Video ID.
    pub id: String,
    /// Site-specific key (e.g., the `YouTube` video ID).
    #[serde(default)]
    pub key: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Hosting site (e.g., `YouTube`).
    #[serde(default)]
    pub site: Option<String>,
    /// Video type (e.g., "Trailer").
    #[serde(default, rename = "type")]
    pub video_type: Option<String>,
    /// Whether the video is official.
    #[serde(default)]
    pub official: Option<bool>,
}

/// A user review.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbReview {
    /// Review ID.
    pub id: String,
    /// Author display name.
    #[serde(default)]
    pub author: Option<String>,
    /// Review body.
    #[serde(default)]
    pub content: Option<String>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Author details.
    #[serde(default)]
    pub author_details: Option<TmdbAuthorDetails>,
}

/// Review author details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbAuthorDetails {
    /// Username.
    #[serde(default)]
    pub username: Option<String>,
    /// Avatar image path.
    #[serde(default)]
    pub avatar_path: Option<String>,
    /// Rating given by the author (0-10).
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Appended `images` sub-resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbImages {
    /// Backdrop images.
    #[serde(default)]
    pub backdrops: Vec<TmdbImage>,
    /// Poster images.
    #[serde(default)]
    pub posters: Vec<TmdbImage>,
}

/// A single image entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbImage {
    /// Image path.
    pub file_path: String,
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    #[serde(default)]
    pub status_code: Option<u32>,
    /// Error message.
    #[serde(default)]
    pub status_message: Option<String>,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: Option<bool>,
}

// --- Request Parameters ---

/// Parameters for `discover/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverMovieParams {
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
}

impl DiscoverMovieParams {
    /// Creates new discover params for the given upstream page.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            language: String::from("en-US"),
            page,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from("en-US"),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Parameters for `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDetailsParams {
    /// Movie ID as received from the caller (not validated here).
    pub movie_id: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Sub-resources to append (e.g., "credits", "videos").
    pub append_to_response: Vec<String>,
    /// Accepted image languages (ISO 639-1 or "null" for untagged).
    pub include_image_language: Vec<String>,
    /// Accepted video languages (ISO 639-1 or "null" for untagged).
    pub include_video_language: Vec<String>,
}

impl MovieDetailsParams {
    /// Creates new detail params for the given movie ID.
    pub fn new(movie_id: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            language: String::from("en-US"),
            append_to_response: Vec::new(),
            include_image_language: Vec::new(),
            include_video_language: Vec::new(),
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the sub-resources to append.
    #[must_use]
    pub fn append_to_response<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append_to_response = resources.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the accepted image and video languages.
    #[must_use]
    pub fn asset_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let languages: Vec<String> = languages.into_iter().map(Into::into).collect();
        self.include_video_language.clone_from(&languages);
        self.include_image_language = languages;
        self
    }

    /// Builds the query pairs for this request (credential excluded).
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("language", self.language.clone())];
        if !self.append_to_response.is_empty() {
            query.push(("append_to_response", self.append_to_response.join(",")));
        }
        if !self.include_image_language.is_empty() {
            query.push((
                "include_image_language",
                self.include_image_language.join(","),
            ));
        }
        if !self.include_video_language.is_empty() {
            query.push((
                "include_video_language",
                self.include_video_language.join(","),
            ));
        }
        query
    }
}
