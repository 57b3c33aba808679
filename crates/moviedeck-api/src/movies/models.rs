//! Normalized response models served to the UI.
//!
//! Each type carries only the fields the UI renders; upstream-only
//! metadata is dropped during conversion.

use serde::{Deserialize, Serialize};

use crate::tmdb::{
    TmdbAuthorDetails, TmdbCastMember, TmdbCrewMember, TmdbGenre, TmdbImage, TmdbMovieListItem,
    TmdbReview, TmdbVideo,
};

/// One movie in a list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date, empty when unknown.
    pub release_date: String,
    /// Vote average, 0 when unknown.
    pub vote_average: f64,
}

impl From<TmdbMovieListItem> for MovieSummary {
    fn from(item: TmdbMovieListItem) -> Self {
        Self {
            id: item.id,
            title: item.title.unwrap_or_default(),
            poster_path: item.poster_path,
            release_date: item.release_date.unwrap_or_default(),
            vote_average: item.vote_average.unwrap_or_default(),
        }
    }
}

/// One application page of movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesPage {
    /// At most one application page of movies.
    pub results: Vec<MovieSummary>,
    /// Requested application page.
    pub page: u32,
    /// Total application pages.
    pub total_pages: u64,
    /// Total matching movies, as reported by TMDB.
    pub total_results: u64,
}

/// Full movie detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Synopsis, possibly from the default locale.
    pub overview: String,
    /// Runtime in minutes, 0 when unknown.
    pub runtime: u32,
    /// Release date, empty when unknown.
    pub release_date: String,
    /// Vote average.
    pub vote_average: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genres.
    pub genres: Vec<Genre>,
    /// Official homepage, empty when unknown.
    pub homepage: String,
    /// Release status, empty when unknown.
    pub status: String,
    /// Tagline, empty when unknown.
    pub tagline: String,
    /// Cast, in upstream order.
    pub cast: Vec<CastMember>,
    /// Crew.
    pub crew: Vec<CrewMember>,
    /// Videos.
    pub videos: Vec<Video>,
    /// Reviews, capped.
    pub reviews: Vec<Review>,
    /// Images, capped per kind.
    pub images: MovieImages,
}

/// Genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Localized genre name.
    pub name: String,
}

impl From<TmdbGenre> for Genre {
    fn from(genre: TmdbGenre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
        }
    }
}

/// Cast member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: String,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Billing order.
    pub order: u32,
}

impl From<TmdbCastMember> for CastMember {
    fn from(member: TmdbCastMember) -> Self {
        Self {
            id: member.id,
            name: member.name.unwrap_or_default(),
            character: member.character.unwrap_or_default(),
            profile_path: member.profile_path,
            order: member.order.unwrap_or_default(),
        }
    }
}

/// Crew member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title.
    pub job: String,
    /// Department.
    pub department: String,
    /// Profile image path.
    pub profile_path: Option<String>,
}

impl From<TmdbCrewMember> for CrewMember {
    fn from(member: TmdbCrewMember) -> Self {
        Self {
            id: member.id,
            name: member.name.unwrap_or_default(),
            job: member.job.unwrap_or_default(),
            department: member.department.unwrap_or_default(),
            profile_path: member.profile_path,
        }
    }
}

/// Video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Video ID.
    pub id: String,
    /// Site-specific key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Hosting site.
    pub site: String,
    /// Video type.
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether the video is official.
    pub official: bool,
}

impl From<TmdbVideo> for Video {
    fn from(video: TmdbVideo) -> Self {
        Self {
            id: video.id,
            key: video.key.unwrap_or_default(),
            name: video.name.unwrap_or_default(),
            site: video.site.unwrap_or_default(),
            video_type: video.video_type.unwrap_or_default(),
            official: video.official.unwrap_or_default(),
        }
    }
}

/// Review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review ID.
    pub id: String,
    /// Author display name.
    pub author: String,
    /// Review body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Author details.
    pub author_details: AuthorDetails,
}

impl From<TmdbReview> for Review {
    fn from(review: TmdbReview) -> Self {
        Self {
            id: review.id,
            author: review.author.unwrap_or_default(),
            content: review.content.unwrap_or_default(),
            created_at: review.created_at.unwrap_or_default(),
            author_details: review.author_details.unwrap_or_default().into(),
        }
    }
}

/// Review author details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDetails {
    /// Username.
    pub username: String,
    /// Avatar image path.
    pub avatar_path: Option<String>,
    /// Rating given by the author.
    pub rating: Option<f64>,
}

impl From<TmdbAuthorDetails> for AuthorDetails {
    fn from(details: TmdbAuthorDetails) -> Self {
        Self {
            username: details.username.unwrap_or_default(),
            avatar_path: details.avatar_path,
            rating: details.rating,
        }
    }
}

/// Image collections of a movie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieImages {
    /// Backdrops, capped.
    pub backdrops: Vec<Image>,
    /// Posters, capped.
    pub posters: Vec<Image>,
}

/// Image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image path.
    pub file_path: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Vote average.
    pub vote_average: f64,
}

impl From<TmdbImage> for Image {
    fn from(image: TmdbImage) -> Self {
        Self {
            file_path: image.file_path,
            width: image.width,
            height: image.height,
            vote_average: image.vote_average,
        }
    }
}
