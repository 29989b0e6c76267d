//! Network integration over a step-count range.
//!
//! Provides the [`Integration`] runtime entry point: per-node reachable
//! fractions for every step count, reduced column-wise by a summarizer.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    Result,
    distance::{DistanceList, vertex_distances},
    error::{GraphSourceError, IntegrationError},
    graph_source::GraphSource,
    observer::{IntegrationObserver, NoopObserver, TracingObserver},
    range::KRange,
    summarizer::{Summarizer, Summary},
    table::{ResultTable, SummaryTable},
};

/// Entry point for computing network integration.
///
/// For every node `v` and step count `k`, the integration score is the share
/// of the other `N - 1` nodes reachable from `v` within `k` hops. Scores are
/// then reduced across nodes, one value per `k`.
///
/// # Examples
/// ```
/// use netreach_core::{GraphSource, GraphSourceError, IntegrationBuilder};
///
/// /// 0 -> 1 -> 2, with node 3 isolated.
/// struct Path;
///
/// impl GraphSource for Path {
///     fn node_count(&self) -> usize { 4 }
///     fn name(&self) -> &str { "path" }
///     fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
///         match node {
///             0 => Ok(vec![1]),
///             1 => Ok(vec![2]),
///             2 | 3 => Ok(Vec::new()),
///             index => Err(GraphSourceError::OutOfBounds { index }),
///         }
///     }
/// }
///
/// let integration = IntegrationBuilder::new()
///     .with_min_k(1)
///     .with_max_k(3)
///     .build()
///     .expect("builder must succeed");
/// let summary = integration.run(&Path).expect("run must succeed");
/// assert_eq!(summary.ks().collect::<Vec<_>>(), vec![1, 2]);
/// assert!((summary.get(2).expect("k = 2 is in range") - 0.25).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Integration {
    k_range: KRange,
    debug: bool,
}

impl Integration {
    pub(crate) fn new(k_range: KRange, debug: bool) -> Self {
        Self { k_range, debug }
    }

    /// Returns the step counts this instance evaluates.
    #[must_use]
    pub fn k_range(&self) -> KRange {
        self.k_range
    }

    /// Returns whether debug diagnostics are enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Computes integration and averages it across nodes.
    ///
    /// # Errors
    /// Returns [`IntegrationError::TooFewNodes`] when the graph has fewer than
    /// two nodes and [`IntegrationError::GraphSource`] when a distance query
    /// fails.
    pub fn run<G>(&self, graph: &G) -> Result<SummaryTable>
    where
        G: GraphSource + ?Sized,
    {
        self.run_with(graph, &Summary::Mean)
    }

    /// Computes integration and reduces it across nodes with `summarizer`.
    ///
    /// # Errors
    /// Fails under the same conditions as [`Integration::run`].
    ///
    /// # Examples
    /// ```
    /// use netreach_core::{GraphSource, GraphSourceError, IntegrationBuilder, Summary};
    ///
    /// struct Edge;
    ///
    /// impl GraphSource for Edge {
    ///     fn node_count(&self) -> usize { 2 }
    ///     fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
    ///         match node {
    ///             0 => Ok(vec![1]),
    ///             1 => Ok(Vec::new()),
    ///             index => Err(GraphSourceError::OutOfBounds { index }),
    ///         }
    ///     }
    /// }
    ///
    /// let integration = IntegrationBuilder::new().with_max_k(2).build()?;
    /// let best = integration.run_with(&Edge, &Summary::Max)?;
    /// assert_eq!(best.entries(), &[(0, 0.0), (1, 1.0)]);
    /// # Ok::<(), netreach_core::IntegrationError>(())
    /// ```
    pub fn run_with<G, S>(&self, graph: &G, summarizer: &S) -> Result<SummaryTable>
    where
        G: GraphSource + ?Sized,
        S: Summarizer + ?Sized,
    {
        Ok(self.node_table(graph)?.summarize(summarizer))
    }

    /// Computes integration while reporting intermediate results to
    /// `observer`, ignoring the debug switch.
    ///
    /// # Errors
    /// Fails under the same conditions as [`Integration::run`].
    pub fn run_observed<G, S, O>(
        &self,
        graph: &G,
        summarizer: &S,
        observer: &O,
    ) -> Result<SummaryTable>
    where
        G: GraphSource + ?Sized,
        S: Summarizer + ?Sized,
        O: IntegrationObserver + ?Sized,
    {
        Ok(self
            .node_table_observed(graph, observer)?
            .summarize(summarizer))
    }

    /// Computes the per-node table of reachable fractions without summarizing.
    ///
    /// # Errors
    /// Fails under the same conditions as [`Integration::run`].
    pub fn node_table<G>(&self, graph: &G) -> Result<ResultTable>
    where
        G: GraphSource + ?Sized,
    {
        if self.debug {
            self.node_table_observed(graph, &TracingObserver)
        } else {
            self.node_table_observed(graph, &NoopObserver)
        }
    }

    /// Computes the per-node table while reporting to `observer`.
    ///
    /// # Errors
    /// Fails under the same conditions as [`Integration::run`].
    #[instrument(
        name = "core.integration",
        err,
        skip(self, graph, observer),
        fields(
            graph = %graph.name(),
            nodes = graph.node_count(),
            min_k = self.k_range.min_k(),
            max_k = self.k_range.max_k(),
            k_step = %self.k_range.k_step(),
        ),
    )]
    pub fn node_table_observed<G, O>(&self, graph: &G, observer: &O) -> Result<ResultTable>
    where
        G: GraphSource + ?Sized,
        O: IntegrationObserver + ?Sized,
    {
        let nodes = graph.node_count();
        if nodes < 2 {
            warn!(
                graph = graph.name(),
                nodes, "graph has too few nodes for integration"
            );
            return Err(IntegrationError::TooFewNodes {
                graph: Arc::from(graph.name()),
                nodes,
            });
        }

        let others = nodes - 1;
        let mut table = ResultTable::new(self.k_range.iter().collect());
        for node in 0..nodes {
            let distances = vertex_distances(graph, node)
                .map_err(|error| wrap_graph_source_error(graph, error))?;
            observer.on_distances(&distances);
            record_node_metrics(&distances);

            let row = table
                .ks()
                .iter()
                .map(|&k| {
                    let reachable = distances.reachable_within(k);
                    observer.on_reachable(node, k, reachable);
                    reachable_fraction(reachable, others)
                })
                .collect();
            table.push_row(row);
        }

        debug!(
            nodes,
            columns = table.ks().len(),
            "integration table completed"
        );
        Ok(table)
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "reachable fractions are ratios of node counts."
)]
fn reachable_fraction(reachable: usize, others: usize) -> f64 {
    reachable as f64 / others as f64
}

fn wrap_graph_source_error<G>(graph: &G, error: GraphSourceError) -> IntegrationError
where
    G: GraphSource + ?Sized,
{
    IntegrationError::GraphSource {
        graph: Arc::from(graph.name()),
        error,
    }
}

#[cfg(feature = "metrics")]
fn record_node_metrics(distances: &DistanceList) {
    let unreachable = distances.len().saturating_sub(distances.reachable());
    metrics::counter!("integration_nodes_processed").increment(1);
    metrics::counter!("integration_unreachable_pairs").increment(unreachable as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_node_metrics(_distances: &DistanceList) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AdjacencyGraph, RecordingObserver};
    use rstest::{fixture, rstest};

    #[fixture]
    fn path_graph() -> AdjacencyGraph {
        AdjacencyGraph::directed(4, &[(0, 1), (1, 2)])
    }

    fn integration(min_k: usize, max_k: usize) -> Integration {
        crate::IntegrationBuilder::new()
            .with_min_k(min_k)
            .with_max_k(max_k)
            .build()
            .expect("configuration must be valid")
    }

    #[rstest]
    fn node_table_counts_reachable_share_per_k(path_graph: AdjacencyGraph) {
        let table = integration(1, 3)
            .node_table(&path_graph)
            .expect("run must succeed");
        let third = 1.0 / 3.0;
        assert_eq!(table.row(0), Some([third, 2.0 / 3.0].as_slice()));
        assert_eq!(table.row(1), Some([third, third].as_slice()));
        assert_eq!(table.row(2), Some([0.0, 0.0].as_slice()));
        assert_eq!(table.row(3), Some([0.0, 0.0].as_slice()));
    }

    #[rstest]
    fn k_zero_never_counts_the_source(path_graph: AdjacencyGraph) {
        let table = integration(0, 1)
            .node_table(&path_graph)
            .expect("run must succeed");
        assert_eq!(table.column(0), Some(vec![0.0; 4]));
    }

    #[rstest]
    fn observer_sees_every_node_and_step(path_graph: AdjacencyGraph) {
        let observer = RecordingObserver::default();
        let summary = integration(1, 3)
            .run_observed(&path_graph, &Summary::Mean, &observer)
            .expect("run must succeed");
        assert_eq!(summary.len(), 2);
        assert_eq!(observer.distance_sources(), vec![0, 1, 2, 3]);
        let counts = observer.reachable_counts();
        assert_eq!(counts.len(), 8);
        assert!(counts.contains(&(0, 2, 2)));
        assert!(counts.contains(&(1, 1, 1)));
        assert!(counts.contains(&(3, 2, 0)));
    }

    #[rstest]
    fn observers_do_not_change_results(path_graph: AdjacencyGraph) {
        let quiet = integration(0, 4).run(&path_graph).expect("run must succeed");
        let observed = integration(0, 4)
            .run_observed(&path_graph, &Summary::Mean, &RecordingObserver::default())
            .expect("run must succeed");
        assert_eq!(quiet, observed);
    }

    #[rstest]
    fn graph_source_failures_carry_the_graph_name() {
        let graph = AdjacencyGraph::directed(2, &[(0, 7)]);
        let err = integration(0, 2)
            .run(&graph)
            .expect_err("dangling edge must fail");
        assert_eq!(
            err.graph_source_code(),
            Some(crate::error::GraphSourceErrorCode::OutOfBounds)
        );
        assert!(matches!(
            err,
            IntegrationError::GraphSource { ref graph, .. } if graph.as_ref() == "adjacency"
        ));
    }
}
