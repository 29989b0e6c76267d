//! Benchmark parameter types.

use std::fmt;

/// Parameters for an integration benchmark run.
#[derive(Clone, Debug)]
pub struct IntegrationBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
    /// Outgoing edges generated per node.
    pub out_degree: usize,
    /// Exclusive upper bound of the step-count range.
    pub max_k: usize,
}

impl fmt::Display for IntegrationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},d={},k<{}",
            self.node_count, self.out_degree, self.max_k
        )
    }
}

/// Parameters for a single-source distance benchmark run.
#[derive(Clone, Debug)]
pub struct DistanceBenchParams {
    /// Number of nodes in the synthetic graph.
    pub node_count: usize,
}

impl fmt::Display for DistanceBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}
