//! # Payload Extraction
//!
//! Bodies are taken as `Result<Json<Value>, JsonRejection>` so that an
//! unparseable body is not answered by Axum's own rejection. Instead it is
//! handed to the validator as `null`, i.e. a payload with no recognized fields.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use movies_core::ValidationErrors;
use serde_json::Value;

use crate::error::AppError;

/// Unwrap a JSON body, mapping any rejection to `Value::Null`.
pub fn extract_payload(result: Result<Json<Value>, JsonRejection>) -> Value {
    match result {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unparseable request body");
            Value::Null
        }
    }
}

/// Extract a JSON body and run it through `validate`.
pub fn extract_validated<T>(
    result: Result<Json<Value>, JsonRejection>,
    validate: fn(&Value) -> Result<T, ValidationErrors>,
) -> Result<T, AppError> {
    let payload = extract_payload(result);
    Ok(validate(&payload)?)
}
