//! # movies-core: Movie Catalog Core
//!
//! The parts of the catalog that carry an actual contract. Everything here is
//! transport-agnostic; the HTTP binding lives in `movies-api`.
//!
//! - [`movie`]: the [`Movie`] record and the typed payloads
//!   ([`MovieData`], [`PartialMovieData`]) that flow into the store.
//! - [`validate`]: turns untrusted JSON into typed payloads, collecting every
//!   violation rather than stopping at the first.
//! - [`store`]: the process-lifetime, insertion-ordered [`MovieStore`].
//! - [`error`]: [`ValidationErrors`] and [`SeedError`].
//!
//! ## Crate Policy
//!
//! - No HTTP or async dependencies.
//! - No `.unwrap()` outside tests.
//! - Typed payloads are only produced by the validator; they never implement
//!   `Deserialize`.

pub mod error;
pub mod movie;
pub mod store;
pub mod validate;

pub use error::{SeedError, ValidationErrors, Violation};
pub use movie::{Movie, MovieData, PartialMovieData};
pub use store::MovieStore;
pub use validate::{validate_full, validate_partial};
