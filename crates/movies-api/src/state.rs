//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The movie collection is an explicit [`MovieStore`] handle owned by
//! [`AppState`]; clones of the state share one collection.

use std::path::PathBuf;

use movies_core::{MovieStore, SeedError};

/// Port used when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 1234;

/// Origins allowed to make cross-origin requests when
/// `MOVIES_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "http://127.0.0.1:5500",
    "http://localhost:1234",
    "https://movies.com",
    "https://midu.dev",
    "https://app-movies-1.vercel.app",
];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// JSON file the movie collection is seeded from.
    pub seed_path: PathBuf,
    /// Directory served for non-API paths.
    pub static_dir: PathBuf,
    /// Exact `Origin` values granted CORS access.
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Build configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `PORT` | `1234` |
    /// | `MOVIES_SEED_PATH` | `data/movies.json` |
    /// | `MOVIES_STATIC_DIR` | `web` |
    /// | `MOVIES_ALLOWED_ORIGINS` | [`DEFAULT_ALLOWED_ORIGINS`] |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let allowed_origins = lookup("MOVIES_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            port,
            seed_path: lookup("MOVIES_SEED_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.seed_path),
            static_dir: lookup("MOVIES_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            allowed_origins,
        }
    }

    /// Whether `origin` is on the CORS allow-list.
    pub fn allows_origin(&self, origin: &[u8]) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed.as_bytes() == origin)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed_path: PathBuf::from("data/movies.json"),
            static_dir: PathBuf::from("web"),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Shared application state accessible to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub movies: MovieStore,
    pub config: AppConfig,
}

impl AppState {
    /// Empty collection with default configuration.
    pub fn new() -> Self {
        Self::with_store(AppConfig::default(), MovieStore::new())
    }

    /// State over an existing store.
    pub fn with_store(config: AppConfig, movies: MovieStore) -> Self {
        Self { movies, config }
    }

    /// Load the seed file named by `config` and build the state around it.
    pub fn load(config: AppConfig) -> Result<Self, SeedError> {
        let movies = MovieStore::load_seed(&config.seed_path)?;
        tracing::info!(
            seed = %config.seed_path.display(),
            count = movies.len(),
            "movie collection seeded"
        );
        Ok(Self::with_store(config, movies))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
