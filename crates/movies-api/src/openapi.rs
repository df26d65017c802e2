//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented movie routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the movie API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        version = "0.1.0",
        description = "CRUD over an in-memory movie collection seeded at startup.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::movies::list_movies,
        crate::routes::movies::get_movie,
        crate::routes::movies::create_movie,
        crate::routes::movies::update_movie,
        crate::routes::movies::delete_movie,
    ),
    components(schemas(
        movies_core::Movie,
        movies_core::Violation,
        crate::error::MessageBody,
        crate::error::ValidationBody,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "movies", description = "Movie collection"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
