//! Shared test utilities used across netreach crates.
//!
//! - [`capture`] records spans and events so tests can assert on structured
//!   diagnostics.
//! - [`proptest_profile`] reads environment overrides for property suites.

pub mod capture;
pub mod proptest_profile;
