//! # Payload Validation
//!
//! Converts untrusted JSON into [`MovieData`] or [`PartialMovieData`].
//!
//! Both modes check every recognized field and report all violations at once.
//! Unrecognized keys (including a caller-supplied `id`) are ignored. A field
//! whose value is `null` counts as absent.
//!
//! A candidate that is not a JSON object has no recognized fields: full mode
//! therefore reports every required field as missing, while partial mode
//! rejects it with a single root violation.

use chrono::{Datelike, Utc};
use serde_json::{Map, Value};
use url::Url;

use crate::error::{ValidationErrors, Violation};
use crate::movie::{MovieData, PartialMovieData};

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1900;

/// Upper bound of the rating scale (the lower bound is 0).
pub const MAX_RATE: f64 = 10.0;

/// Latest accepted release year: one year past the current UTC year.
pub fn max_year() -> i32 {
    Utc::now().year() + 1
}

/// Validate a complete movie payload for creation.
///
/// `rate` is optional and defaults to 0; every other field is required.
pub fn validate_full(candidate: &Value) -> Result<MovieData, ValidationErrors> {
    let empty = Map::new();
    let mut checker = Checker::new(candidate.as_object().unwrap_or(&empty));

    let title = checker.required("title", check_text);
    let year = checker.required("year", check_year);
    let director = checker.required("director", check_text);
    let duration = checker.required("duration", check_duration);
    let poster = checker.required("poster", check_poster);
    let genre = checker.required("genre", check_genre);
    let rate = checker.optional("rate", check_rate);

    match (title, year, director, duration, poster, genre) {
        (Some(title), Some(year), Some(director), Some(duration), Some(poster), Some(genre))
            if checker.is_clean() =>
        {
            Ok(MovieData {
                title,
                year,
                director,
                duration,
                poster,
                genre,
                rate: rate.unwrap_or(0.0),
            })
        }
        _ => Err(checker.into_errors()),
    }
}

/// Validate a partial payload for a merge-style update.
///
/// Any subset of fields is accepted, including none at all.
pub fn validate_partial(candidate: &Value) -> Result<PartialMovieData, ValidationErrors> {
    let Some(fields) = candidate.as_object() else {
        return Err(ValidationErrors::new(vec![Violation::new(
            "",
            "payload must be a JSON object",
        )]));
    };
    let mut checker = Checker::new(fields);

    let patch = PartialMovieData {
        title: checker.optional("title", check_text),
        year: checker.optional("year", check_year),
        director: checker.optional("director", check_text),
        duration: checker.optional("duration", check_duration),
        poster: checker.optional("poster", check_poster),
        genre: checker.optional("genre", check_genre),
        rate: checker.optional("rate", check_rate),
    };

    if checker.is_clean() {
        Ok(patch)
    } else {
        Err(checker.into_errors())
    }
}

/// A field check: returns the typed value, or records violations and
/// returns `None`. Never returns `None` without recording at least one.
type Check<T> = fn(&str, &Value, &mut Vec<Violation>) -> Option<T>;

struct Checker<'a> {
    fields: &'a Map<String, Value>,
    violations: Vec<Violation>,
}

impl<'a> Checker<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            violations: Vec::new(),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        let fields = self.fields;
        fields.get(field).filter(|value| !value.is_null())
    }

    fn required<T>(&mut self, field: &str, check: Check<T>) -> Option<T> {
        match self.present(field) {
            Some(value) => check(field, value, &mut self.violations),
            None => {
                self.violations
                    .push(Violation::new(pointer(field), format!("{field} is required")));
                None
            }
        }
    }

    fn optional<T>(&mut self, field: &str, check: Check<T>) -> Option<T> {
        let value = self.present(field)?;
        check(field, value, &mut self.violations)
    }

    fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_errors(self) -> ValidationErrors {
        ValidationErrors::new(self.violations)
    }
}

fn pointer(field: &str) -> String {
    format!("/{field}")
}

/// Integer value of a JSON number with no fractional part, so `90.0` reads
/// as `90`. Magnitudes beyond `i64` saturate and fail the range checks.
fn integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if value.as_u64().is_some() {
        return Some(i64::MAX);
    }
    value
        .as_f64()
        .filter(|n| n.fract() == 0.0)
        .map(|n| n as i64)
}

fn check_text(field: &str, value: &Value, out: &mut Vec<Violation>) -> Option<String> {
    let Some(text) = value.as_str() else {
        out.push(Violation::new(pointer(field), format!("{field} must be a string")));
        return None;
    };
    if text.trim().is_empty() {
        out.push(Violation::new(pointer(field), format!("{field} must not be empty")));
        return None;
    }
    Some(text.to_string())
}

fn check_year(field: &str, value: &Value, out: &mut Vec<Violation>) -> Option<i32> {
    let Some(year) = integer(value) else {
        out.push(Violation::new(pointer(field), format!("{field} must be an integer")));
        return None;
    };
    let max = max_year();
    match i32::try_from(year) {
        Ok(year) if (MIN_YEAR..=max).contains(&year) => Some(year),
        _ => {
            out.push(Violation::new(
                pointer(field),
                format!("{field} must be between {MIN_YEAR} and {max}"),
            ));
            None
        }
    }
}

fn check_duration(field: &str, value: &Value, out: &mut Vec<Violation>) -> Option<u32> {
    let Some(duration) = integer(value) else {
        out.push(Violation::new(pointer(field), format!("{field} must be an integer")));
        return None;
    };
    match u32::try_from(duration) {
        Ok(duration) if duration > 0 => Some(duration),
        _ => {
            out.push(Violation::new(
                pointer(field),
                format!("{field} must be a positive integer"),
            ));
            None
        }
    }
}

fn check_poster(field: &str, value: &Value, out: &mut Vec<Violation>) -> Option<String> {
    let Some(poster) = value.as_str() else {
        out.push(Violation::new(pointer(field), format!("{field} must be a string")));
        return None;
    };
    if Url::parse(poster).is_err() {
        out.push(Violation::new(pointer(field), format!("{field} must be a valid URL")));
        return None;
    }
    Some(poster.to_string())
}

fn check_genre(field: &str, value: &Value, out: &mut Vec<Violation>) -> Option<Vec<String>> {
    let Some(entries) = value.as_array() else {
        out.push(Violation::new(
            pointer(field),
            format!("{field} must be an array of strings"),
        ));
        return None;
    };
    if entries.is_empty() {
        out.push(Violation::new(pointer(field), format!("{field} must not be empty")));
        return None;
    }

    let before = out.len();
    let mut genres = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_str() {
            Some(g) if !g.trim().is_empty() => genres.push(g.to_string()),
            _ => out.push(Violation::new(
                format!("/{field}/{i}"),
                format!("{field} entries must be non-empty strings"),
            )),
        }
    }
    (out.len() == before).then_some(genres)
}

fn check_rate(field: &str, value: &Value, out: &mut Vec<Violation>) -> Option<f64> {
    let Some(rate) = value.as_f64() else {
        out.push(Violation::new(pointer(field), format!("{field} must be a number")));
        return None;
    };
    if !(0.0..=MAX_RATE).contains(&rate) {
        out.push(Violation::new(
            pointer(field),
            format!("{field} must be between 0 and {MAX_RATE}"),
        ));
        return None;
    }
    Some(rate)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Arbitrary JSON, biased towards objects that use the movie field names.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            (-20.0f64..3000.0).prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9:/. ]{0,20}".prop_map(Value::String),
        ];
        let keys = prop_oneof![
            Just("title".to_string()),
            Just("year".to_string()),
            Just("director".to_string()),
            Just("duration".to_string()),
            Just("poster".to_string()),
            Just("genre".to_string()),
            Just("rate".to_string()),
            "[a-z]{1,8}",
        ];
        leaf.prop_recursive(3, 48, 8, move |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map(keys.clone(), inner, 0..8)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        /// A failed full validation always explains itself.
        #[test]
        fn full_failure_is_never_empty(value in json_value()) {
            if let Err(errors) = validate_full(&value) {
                prop_assert!(!errors.is_empty());
            }
        }

        /// A failed partial validation always explains itself.
        #[test]
        fn partial_failure_is_never_empty(value in json_value()) {
            if let Err(errors) = validate_partial(&value) {
                prop_assert!(!errors.is_empty());
            }
        }

        /// Any payload that passes full validation also passes partial
        /// validation with every field present.
        #[test]
        fn full_success_implies_partial_success(value in json_value()) {
            if let Ok(data) = validate_full(&value) {
                let patch = validate_partial(&value);
                prop_assert!(patch.is_ok());
                let patch = patch.unwrap();
                prop_assert_eq!(patch.title, Some(data.title));
                prop_assert_eq!(patch.genre, Some(data.genre));
            }
        }

        /// Validation is deterministic.
        #[test]
        fn validation_is_deterministic(value in json_value()) {
            prop_assert_eq!(validate_partial(&value), validate_partial(&value));
        }
    }
}
