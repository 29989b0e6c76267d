//! Benchmark setup error type.

use netreach_core::{GraphSourceError, IntegrationError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The integration could not be configured.
    #[error("integration setup failed: {0}")]
    Integration(#[from] IntegrationError),
    /// A shortest-path query failed while priming the benchmark.
    #[error("graph source error: {0}")]
    GraphSource(#[from] GraphSourceError),
}
