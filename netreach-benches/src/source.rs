//! Seeded synthetic graphs for benchmarks.

use petgraph::{Directed, graph::Graph};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Directed graph type produced by [`SyntheticGraph::generate`].
pub type BenchGraph = Graph<(), (), Directed, usize>;

/// Configuration for a random directed graph with a fixed out-degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Distinct outgoing edges drawn for every node.
    pub out_degree: usize,
    /// Seed for the random generator.
    pub seed: u64,
}

/// Errors raised while generating synthetic graphs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Integration needs at least two nodes.
    #[error("synthetic graphs need at least two nodes, got {node_count}")]
    TooFewNodes {
        /// Requested node count.
        node_count: usize,
    },
    /// Each node can point at most at every other node.
    #[error("out-degree {out_degree} exceeds the {available} other nodes")]
    OutDegreeTooLarge {
        /// Requested out-degree.
        out_degree: usize,
        /// Nodes other than the tail.
        available: usize,
    },
}

/// Generator for seeded random directed graphs without self-loops or
/// parallel edges.
#[derive(Debug)]
pub struct SyntheticGraph;

impl SyntheticGraph {
    /// Generates a graph from `config`; equal configs yield equal graphs.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the node count is below two or the
    /// out-degree cannot be satisfied without self-loops.
    ///
    /// # Examples
    /// ```
    /// use netreach_benches::source::{SyntheticGraph, SyntheticGraphConfig};
    ///
    /// let graph = SyntheticGraph::generate(&SyntheticGraphConfig {
    ///     node_count: 10,
    ///     out_degree: 3,
    ///     seed: 7,
    /// })?;
    /// assert_eq!(graph.node_count(), 10);
    /// assert_eq!(graph.edge_count(), 30);
    /// # Ok::<(), netreach_benches::source::SyntheticError>(())
    /// ```
    pub fn generate(config: &SyntheticGraphConfig) -> Result<BenchGraph, SyntheticError> {
        let node_count = config.node_count;
        if node_count < 2 {
            return Err(SyntheticError::TooFewNodes { node_count });
        }
        let available = node_count.saturating_sub(1);
        if config.out_degree > available {
            return Err(SyntheticError::OutDegreeTooLarge {
                out_degree: config.out_degree,
                available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut graph = BenchGraph::with_capacity(
            node_count,
            node_count.saturating_mul(config.out_degree),
        );
        for _ in 0..node_count {
            graph.add_node(());
        }

        let mut targets = Vec::with_capacity(config.out_degree);
        for tail in 0..node_count {
            targets.clear();
            while targets.len() < config.out_degree {
                let head = rng.gen_range(0..node_count);
                if head != tail && !targets.contains(&head) {
                    targets.push(head);
                }
            }
            graph.extend_with_edges(targets.iter().map(|&head| (tail, head)));
        }
        Ok(graph)
    }
}
