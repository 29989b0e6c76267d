//! Benchmark support crate for netreach.
//!
//! Provides seeded synthetic graphs and parameter types used by the Criterion
//! benchmarks for distance extraction and integration tables.

pub mod error;
pub mod params;
pub mod source;
