//! # Request Metrics
//!
//! In-process request counters, split by response class, exposed as JSON at
//! `GET /metrics`. There is no exporter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shared request counters. Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    client_errors: AtomicU64,
    server_errors: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub client_errors: u64,
    pub server_errors: u64,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished request with the given status.
    pub fn record(&self, status: axum::http::StatusCode) {
        self.inner.requests.fetch_add(1, Ordering::Relaxed);
        if status.is_client_error() {
            self.inner.client_errors.fetch_add(1, Ordering::Relaxed);
        } else if status.is_server_error() {
            self.inner.server_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.inner.requests.load(Ordering::Relaxed),
            client_errors: self.inner.client_errors.load(Ordering::Relaxed),
            server_errors: self.inner.server_errors.load(Ordering::Relaxed),
        }
    }
}

/// Middleware that records every response passing through it.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.record(response.status());
    }

    response
}

/// Router serving the counters at `/metrics`.
pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/metrics", get(metrics_snapshot))
}

async fn metrics_snapshot(Extension(metrics): Extension<ApiMetrics>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn record_splits_by_class() {
        let metrics = ApiMetrics::new();
        metrics.record(StatusCode::OK);
        metrics.record(StatusCode::CREATED);
        metrics.record(StatusCode::NOT_FOUND);
        metrics.record(StatusCode::BAD_REQUEST);
        metrics.record(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                requests: 5,
                client_errors: 2,
                server_errors: 1,
            }
        );
    }

    #[test]
    fn clones_share_counters() {
        let metrics = ApiMetrics::new();
        metrics.clone().record(StatusCode::OK);
        assert_eq!(metrics.snapshot().requests, 1);
    }
}
