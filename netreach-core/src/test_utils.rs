//! Shared test utilities for `netreach-core`.

use std::sync::Mutex;

use crate::{
    distance::DistanceList,
    error::GraphSourceError,
    graph_source::{GraphSource, PathLength},
    observer::IntegrationObserver,
};

/// Directed adjacency-list [`GraphSource`] relying on the breadth-first default.
///
/// Edges pointing outside the graph are kept so tests can exercise error paths.
#[derive(Clone, Debug)]
pub(crate) struct AdjacencyGraph {
    adjacency: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// Builds a graph with `nodes` nodes and the given directed edges.
    #[must_use]
    pub(crate) fn directed(nodes: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); nodes];
        for &(from, to) in edges {
            if let Some(targets) = adjacency.get_mut(from) {
                targets.push(to);
            }
        }
        Self { adjacency }
    }
}

impl GraphSource for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn name(&self) -> &str {
        "adjacency"
    }

    fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
        self.adjacency
            .get(node)
            .cloned()
            .ok_or(GraphSourceError::OutOfBounds { index: node })
    }
}

/// [`GraphSource`] whose shortest-path query replays a fixed answer.
#[derive(Clone, Debug)]
pub(crate) struct ScriptedGraph {
    nodes: usize,
    lengths: Vec<PathLength>,
}

impl ScriptedGraph {
    /// Creates a graph reporting `nodes` nodes and answering every query with
    /// `lengths`.
    #[must_use]
    pub(crate) fn new(nodes: usize, lengths: Vec<PathLength>) -> Self {
        Self { nodes, lengths }
    }
}

impl GraphSource for ScriptedGraph {
    fn node_count(&self) -> usize {
        self.nodes
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn out_neighbours(&self, _node: usize) -> Result<Vec<usize>, GraphSourceError> {
        Ok(Vec::new())
    }

    fn shortest_path_lengths(&self, _source: usize) -> Result<Vec<PathLength>, GraphSourceError> {
        Ok(self.lengths.clone())
    }
}

/// [`IntegrationObserver`] that records every hook invocation.
#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    sources: Mutex<Vec<usize>>,
    reachable: Mutex<Vec<(usize, usize, usize)>>,
}

impl RecordingObserver {
    /// Returns the source node of every distance list seen, in order.
    pub(crate) fn distance_sources(&self) -> Vec<usize> {
        self.sources.lock().expect("lock poisoned").clone()
    }

    /// Returns every `(node, k, reachable)` triple seen, in order.
    pub(crate) fn reachable_counts(&self) -> Vec<(usize, usize, usize)> {
        self.reachable.lock().expect("lock poisoned").clone()
    }
}

impl IntegrationObserver for RecordingObserver {
    fn on_distances(&self, distances: &DistanceList) {
        self.sources
            .lock()
            .expect("lock poisoned")
            .push(distances.source());
    }

    fn on_reachable(&self, node: usize, k: usize, reachable: usize) {
        self.reachable
            .lock()
            .expect("lock poisoned")
            .push((node, k, reachable));
    }
}
