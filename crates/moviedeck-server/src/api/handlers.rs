//! Request handlers.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use chrono::{SecondsFormat, Utc};
use moviedeck_api::movies::{ListMoviesRequest, MovieDetail, MoviesPage};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health check body.
#[derive(Debug, Serialize)]
pub struct Health {
    ok: bool,
    service: &'static str,
    timestamp: String,
}

/// Raw `GET /movies` query.
///
/// Values stay strings so a malformed page reaches page validation.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    search: Option<String>,
    lang: Option<String>,
}

/// Raw `GET /movies/{id}` query.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    lang: Option<String>,
}

/// `GET /api/health`
pub async fn health() -> Json<Health> {
    Json(Health {
        ok: true,
        service: "backend",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// `GET /movies?page=&search=&lang=`
pub async fn list_movies(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<MoviesPage>> {
    let Query(query) = query?;
    let request = ListMoviesRequest::from_query(
        query.page.as_deref(),
        query.search.as_deref(),
        query.lang.as_deref(),
    )?;
    let page = state.movies.list_movies(&request).await?;
    Ok(Json(page))
}

/// `GET /movies/{id}?lang=`
///
/// Only all-digit ids reach TMDB; anything else is a 404.
pub async fn movie_detail(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> ApiResult<Json<MovieDetail>> {
    let Path(id) = id?;
    if !is_movie_id(&id) {
        return Err(ApiError::not_found());
    }
    let Query(query) = query?;
    let detail = state
        .movies
        .get_movie_detail(&id, query.lang.as_deref())
        .await?;
    Ok(Json(detail))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Returns `true` for non-empty, all-digit path segments.
fn is_movie_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
