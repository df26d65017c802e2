//! # API Route Modules
//!
//! - `movies`: CRUD over the in-memory movie collection.

pub mod movies;
