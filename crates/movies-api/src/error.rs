//! # API Error Types
//!
//! [`AppError`] implements `axum::response::IntoResponse` and renders the
//! catalog's wire format:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `Validation` | 400 | `{"error": [{"path", "message"}, ...]}` |
//! | `NotFound` | 404 | `{"message": "..."}` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use movies_core::{ValidationErrors, Violation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned when a movie id does not resolve.
pub const MOVIE_NOT_FOUND: &str = "Movie not found";

/// `{"message": "..."}` body used for not-found and delete confirmations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"error": [...]}` body listing every validation violation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationBody {
    pub error: Vec<Violation>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload failed validation (400).
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    /// The fixed not-found error for movie lookups.
    pub fn movie_not_found() -> Self {
        Self::NotFound(MOVIE_NOT_FOUND.to_string())
    }

    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match self {
            Self::Validation(errors) => {
                tracing::debug!(code, violations = errors.len(), "request rejected");
                let body = ValidationBody {
                    error: errors.into_inner(),
                };
                (status, Json(body)).into_response()
            }
            Self::NotFound(message) => {
                tracing::debug!(code, %message, "request rejected");
                (status, Json(MessageBody::new(message))).into_response()
            }
        }
    }
}
