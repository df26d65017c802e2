//! # Movie API
//!
//! CRUD over the movie collection. Mutating handlers always validate the
//! payload before resolving the id, so a bad payload against a missing id is
//! a 400, not a 404.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use movies_core::{validate_full, validate_partial, Movie};
use serde_json::Value;
use utoipa::IntoParams;

use crate::error::{AppError, MessageBody, ValidationBody};
use crate::extractors::extract_validated;
use crate::state::AppState;

/// Query parameters for listing movies.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesQuery {
    /// Case-insensitive genre filter. Empty means no filter.
    pub genre: Option<String>,
}

impl ListMoviesQuery {
    /// Build from raw query pairs. Only the first `genre` counts; repeats and
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let genre = pairs
            .into_iter()
            .find(|(key, _)| key == "genre")
            .map(|(_, value)| value);
        Self { genre }
    }
}

/// Build the movies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
}

/// GET /movies: List movies, optionally filtered by genre.
#[utoipa::path(
    get,
    path = "/movies",
    params(ListMoviesQuery),
    responses(
        (status = 200, description = "Movies in insertion order", body = Vec<Movie>),
    ),
    tag = "movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Movie>> {
    let query = ListMoviesQuery::from_pairs(pairs);
    Json(state.movies.list_by_genre(query.genre.as_deref()))
}

/// GET /movies/{id}: Get a movie.
#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "Not found", body = MessageBody),
    ),
    tag = "movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, AppError> {
    state
        .movies
        .find_by_id(&id)
        .map(Json)
        .ok_or_else(AppError::movie_not_found)
}

/// POST /movies: Create a movie.
///
/// The id is always generated; a caller-supplied `id` is ignored along with
/// any other unrecognized field.
#[utoipa::path(
    post,
    path = "/movies",
    request_body(content = Value, description = "Movie payload without id"),
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 400, description = "Invalid payload", body = ValidationBody),
    ),
    tag = "movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), AppError> {
    let data = extract_validated(body, validate_full)?;
    let movie = state.movies.insert(data);
    tracing::info!(movie_id = %movie.id, title = %movie.title, "movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PATCH /movies/{id}: Merge a partial payload into a movie.
#[utoipa::path(
    patch,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie ID")),
    request_body(content = Value, description = "Any subset of the movie fields"),
    responses(
        (status = 200, description = "Merged movie", body = Movie),
        (status = 400, description = "Invalid payload", body = ValidationBody),
        (status = 404, description = "Not found", body = MessageBody),
    ),
    tag = "movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, AppError> {
    let patch = extract_validated(body, validate_partial)?;
    let movie = state
        .movies
        .update_partial(&id, patch)
        .ok_or_else(AppError::movie_not_found)?;
    tracing::info!(movie_id = %movie.id, "movie updated");
    Ok(Json(movie))
}

/// DELETE /movies/{id}: Delete a movie.
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie deleted", body = MessageBody),
        (status = 404, description = "Not found", body = MessageBody),
    ),
    tag = "movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    if !state.movies.delete(&id) {
        return Err(AppError::movie_not_found());
    }
    tracing::info!(movie_id = %id, "movie deleted");
    Ok(Json(MessageBody::new("Movie deleted")))
}
