//! Nearby-apartment recommendations over precomputed similarity matrices.
//!
//! Three pairwise similarity matrices are combined into a weighted composite
//! score; [`similarity::recommend`] ranks every other property against a
//! query property. [`nearby::DistanceMatrix`] answers radius searches around
//! named locations. Both are loaded once and shared read-only.

pub mod catalog;
pub mod config;
pub mod config_processors;
pub mod dataframeutils;
pub mod endpoints;
pub mod error;
pub mod io;
pub mod nearby;
pub mod similarity;

pub use error::{RecommendError, Result};
