//! # Movie Store
//!
//! Process-lifetime collection of [`Movie`] records, kept in insertion order.
//!
//! All operations are synchronous: the lock is a `parking_lot::RwLock` and is
//! never held across an `.await`. Reads share the lock; every mutation,
//! including the read-merge-write of a partial update, runs under a single
//! write acquisition, so readers never observe a half-applied change.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::SeedError;
use crate::movie::{Movie, MovieData, PartialMovieData};

/// Thread-safe, cloneable handle to the movie collection.
///
/// Clones share the same underlying collection.
#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-valid records, rejecting duplicate ids.
    ///
    /// Seed records are trusted and not re-validated.
    pub fn from_seed(movies: Vec<Movie>) -> Result<Self, SeedError> {
        {
            let mut seen = HashSet::with_capacity(movies.len());
            for movie in &movies {
                if !seen.insert(movie.id.as_str()) {
                    return Err(SeedError::DuplicateId(movie.id.clone()));
                }
            }
        }
        Ok(Self {
            movies: Arc::new(RwLock::new(movies)),
        })
    }

    /// Load the seed file: a JSON array of movie records.
    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let movies: Vec<Movie> =
            serde_json::from_slice(&raw).map_err(|source| SeedError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_seed(movies)
    }

    /// All records in insertion order.
    pub fn list_all(&self) -> Vec<Movie> {
        self.movies.read().clone()
    }

    /// Records with a genre matching `genre` case-insensitively.
    ///
    /// `None` or an empty string means no filter.
    pub fn list_by_genre(&self, genre: Option<&str>) -> Vec<Movie> {
        match genre.filter(|g| !g.is_empty()) {
            Some(genre) => self
                .movies
                .read()
                .iter()
                .filter(|movie| movie.has_genre(genre))
                .cloned()
                .collect(),
            None => self.list_all(),
        }
    }

    /// Look up a record by id.
    pub fn find_by_id(&self, id: &str) -> Option<Movie> {
        self.movies.read().iter().find(|m| m.id == id).cloned()
    }

    /// Assign a fresh id, append the record, and return it.
    pub fn insert(&self, data: MovieData) -> Movie {
        let mut movies = self.movies.write();
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !movies.iter().any(|m| m.id == candidate) {
                break candidate;
            }
        };
        let movie = Movie::new(id, data);
        movies.push(movie.clone());
        movie
    }

    /// Merge `patch` over the record with `id`, keeping its position.
    ///
    /// Returns the merged record, or `None` if no record has that id.
    pub fn update_partial(&self, id: &str, patch: PartialMovieData) -> Option<Movie> {
        let mut movies = self.movies.write();
        let movie = movies.iter_mut().find(|m| m.id == id)?;
        movie.apply(patch);
        Some(movie.clone())
    }

    /// Remove the record with `id`. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> bool {
        let mut movies = self.movies.write();
        match movies.iter().position(|m| m.id == id) {
            Some(index) => {
                movies.remove(index);
                true
            }
            None => false,
        }
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.movies.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_a() -> Movie {
        Movie {
            id: "1".to_string(),
            title: "A".to_string(),
            year: 2000,
            director: "D".to_string(),
            duration: 100,
            poster: "http://x/p.jpg".to_string(),
            genre: vec!["Drama".to_string()],
            rate: 5.0,
        }
    }

    fn data_b() -> MovieData {
        MovieData {
            title: "B".to_string(),
            year: 2021,
            director: "E".to_string(),
            duration: 90,
            poster: "http://x/q.jpg".to_string(),
            genre: vec!["Action".to_string()],
            rate: 0.0,
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn single_seed_walkthrough() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();

        assert_eq!(titles(&store.list_by_genre(Some("drama"))), vec!["A"]);
        assert!(store.find_by_id("2").is_none());

        let b = store.insert(data_b());
        assert_eq!(b.rate, 0.0);
        assert_ne!(b.id, "1");
        assert_eq!(store.find_by_id(&b.id), Some(b.clone()));

        let patched = store
            .update_partial(
                "1",
                PartialMovieData {
                    rate: Some(8.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(
            patched,
            Movie {
                rate: 8.0,
                ..movie_a()
            }
        );

        assert!(store.delete("1"));
        assert_eq!(store.list_all(), vec![b]);
    }

    #[test]
    fn insert_appends_in_order() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();
        let first = store.insert(data_b());
        let second = store.insert(MovieData {
            title: "C".to_string(),
            ..data_b()
        });
        assert_ne!(first.id, second.id);
        assert_eq!(titles(&store.list_all()), vec!["A", "B", "C"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn insert_generates_uuid_ids() {
        let store = MovieStore::new();
        let movie = store.insert(data_b());
        assert!(Uuid::parse_str(&movie.id).is_ok());
    }

    #[test]
    fn update_preserves_position() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();
        store.insert(data_b());
        store.update_partial(
            "1",
            PartialMovieData {
                title: Some("A-prime".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(titles(&store.list_all()), vec!["A-prime", "B"]);
    }

    #[test]
    fn update_missing_id_is_none() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();
        assert!(store
            .update_partial("nope", PartialMovieData::default())
            .is_none());
        assert_eq!(store.list_all(), vec![movie_a()]);
    }

    #[test]
    fn delete_missing_id_is_false() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();
        assert!(!store.delete("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_then_find_is_none() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();
        assert!(store.delete("1"));
        assert!(store.find_by_id("1").is_none());
        assert!(!store.delete("1"));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_genre_filter_lists_all() {
        let store = MovieStore::from_seed(vec![movie_a()]).unwrap();
        store.insert(data_b());
        assert_eq!(store.list_by_genre(Some("")).len(), 2);
        assert_eq!(store.list_by_genre(None).len(), 2);
        assert!(store.list_by_genre(Some("Western")).is_empty());
    }

    #[test]
    fn clones_share_state() {
        let store = MovieStore::new();
        let handle = store.clone();
        handle.insert(data_b());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seed_rejects_duplicate_ids() {
        let err = MovieStore::from_seed(vec![movie_a(), movie_a()]).unwrap_err();
        assert!(matches!(err, SeedError::DuplicateId(id) if id == "1"));
    }

    #[test]
    fn concurrent_inserts_keep_ids_unique() {
        let store = MovieStore::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.insert(data_b());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        let ids: HashSet<String> = store.list_all().into_iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 400);
    }
}
