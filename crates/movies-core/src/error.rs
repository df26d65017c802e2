//! # Error Types
//!
//! Validation failures carry every violation found in a payload, each with a
//! JSON Pointer into the offending field. Seed errors only occur at startup.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Violation {
    /// JSON Pointer to the violating value (`""` for the payload root).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// One or more violations produced by a failed validation.
///
/// Serializes as a plain array of [`Violation`]s. Never empty when returned
/// from [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("payload failed validation with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

/// Error loading the initial movie collection.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of movie records.
    #[error("failed to parse seed file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two seed records share an id.
    #[error("duplicate movie id in seed data: {0}")]
    DuplicateId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_display_includes_path() {
        let v = Violation::new("/year", "year must be an integer");
        assert_eq!(v.to_string(), "/year: year must be an integer");
    }

    #[test]
    fn root_violation_display() {
        let v = Violation::new("", "payload must be a JSON object");
        assert_eq!(v.to_string(), "(root): payload must be a JSON object");
    }

    #[test]
    fn validation_errors_serialize_as_array() {
        let errors = ValidationErrors::new(vec![
            Violation::new("/title", "title is required"),
            Violation::new("/genre/0", "genre entries must be non-empty strings"),
        ]);
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"path": "/title", "message": "title is required"},
                {"path": "/genre/0", "message": "genre entries must be non-empty strings"},
            ])
        );
    }

    #[test]
    fn validation_errors_display_counts_violations() {
        let errors = ValidationErrors::new(vec![
            Violation::new("/title", "title is required"),
            Violation::new("/year", "year is required"),
        ]);
        assert_eq!(
            errors.to_string(),
            "payload failed validation with 2 violation(s)"
        );
        assert_eq!(errors.violations()[1].path, "/year");
    }

    #[test]
    fn duplicate_id_message() {
        let err = SeedError::DuplicateId("abc".to_string());
        assert!(err.to_string().contains("abc"));
    }
}
