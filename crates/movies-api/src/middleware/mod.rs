//! # Middleware
//!
//! - `metrics`: request counters and the `/metrics` endpoint.
//! - `cors`: origin allow-listing.

pub mod cors;
pub mod metrics;
