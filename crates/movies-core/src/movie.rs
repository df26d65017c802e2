//! # Movie Records
//!
//! [`Movie`] is the stored unit. [`MovieData`] and [`PartialMovieData`] are
//! the validated payloads for create and update; they deliberately do not
//! implement `Deserialize`, so the only way to obtain one from caller input is
//! through [`crate::validate`].

use serde::{Deserialize, Serialize, Serializer};

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Movie {
    /// System-assigned identifier. Immutable once assigned.
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    /// Running time in minutes.
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<String>,
    /// Written as a JSON integer when whole (`5`, not `5.0`).
    #[serde(default, serialize_with = "serialize_rate")]
    pub rate: f64,
}

/// Largest magnitude below which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_rate<S: Serializer>(rate: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rate.fract() == 0.0 && rate.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*rate as i64)
    } else {
        serializer.serialize_f64(*rate)
    }
}

impl Movie {
    /// Build a record from validated data and a freshly assigned id.
    pub fn new(id: impl Into<String>, data: MovieData) -> Self {
        Self {
            id: id.into(),
            title: data.title,
            year: data.year,
            director: data.director,
            duration: data.duration,
            poster: data.poster,
            genre: data.genre,
            rate: data.rate,
        }
    }

    /// Overwrite the fields present in `patch`; everything else, including
    /// `id`, is retained.
    pub fn apply(&mut self, patch: PartialMovieData) {
        let PartialMovieData {
            title,
            year,
            director,
            duration,
            poster,
            genre,
            rate,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(year) = year {
            self.year = year;
        }
        if let Some(director) = director {
            self.director = director;
        }
        if let Some(duration) = duration {
            self.duration = duration;
        }
        if let Some(poster) = poster {
            self.poster = poster;
        }
        if let Some(genre) = genre {
            self.genre = genre;
        }
        if let Some(rate) = rate {
            self.rate = rate;
        }
    }

    /// Case-insensitive match of `genre` against any of this movie's genres.
    pub fn has_genre(&self, genre: &str) -> bool {
        let needle = genre.to_lowercase();
        self.genre.iter().any(|g| g.to_lowercase() == needle)
    }
}

/// A complete, validated movie payload (everything but the id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieData {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<String>,
    /// Defaults to 0 when the payload omits it.
    pub rate: f64,
}

/// A validated partial payload. Absent fields are `None` and leave the
/// stored value untouched on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartialMovieData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

#[cfg(test)]
impl PartialMovieData {
    /// True when no recognized field was supplied.
    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
