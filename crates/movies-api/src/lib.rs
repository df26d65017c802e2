//! # movies-api: REST API for the Movie Catalog
//!
//! Binds the `movies-core` validator and store to HTTP.
//!
//! ## API Surface
//!
//! | Route                  | Module                  | Purpose              |
//! |------------------------|-------------------------|----------------------|
//! | `/movies`, `/movies/{id}` | [`routes::movies`]   | Movie CRUD           |
//! | `/openapi.json`        | [`openapi`]             | OpenAPI document     |
//! | `/metrics`             | [`middleware::metrics`] | Request counters     |
//! | `/health/*`            | this module             | Liveness/readiness   |
//! | anything else          | static directory        | `web/` files, else `<h1>404</h1>` |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::Html;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::middleware::metrics::{metrics_middleware, ApiMetrics};
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Paths that match no API route are looked up in the static directory.
/// Anything still unmatched, including a known path with an unsupported
/// method, gets the HTML 404.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let cors = cors_layer(&state.config);
    let static_files = ServeDir::new(&state.config.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .merge(routes::movies::router())
        .merge(openapi::router())
        .merge(middleware::metrics::router())
        .method_not_allowed_fallback(not_found)
        .fallback_service(static_files)
        .layer(from_fn(metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(metrics))
        .with_state(state)
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The store is seeded before the router is built.
async fn readiness() -> &'static str {
    "ready"
}

/// Generic not-found page for unmatched routes.
async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html("<h1>404</h1>"))
}
