use netreach_core::{GraphSource, GraphSourceError};
use petgraph::graph::{DiGraph, UnGraph};

/// Edges of the four-node reference graph: a path 0 - 1 - 2 plus isolated node 3.
pub const PATH_EDGES: [(u32, u32); 2] = [(0, 1), (1, 2)];

/// Builds a directed graph with `nodes` nodes and the given edges.
#[must_use]
pub fn directed(nodes: usize, edges: &[(u32, u32)]) -> DiGraph<(), ()> {
    let mut graph = DiGraph::with_capacity(nodes, edges.len());
    for _ in 0..nodes {
        graph.add_node(());
    }
    graph.extend_with_edges(edges.iter().copied());
    graph
}

/// Builds an undirected graph with `nodes` nodes and the given edges.
#[must_use]
pub fn undirected(nodes: usize, edges: &[(u32, u32)]) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(nodes, edges.len());
    for _ in 0..nodes {
        graph.add_node(());
    }
    graph.extend_with_edges(edges.iter().copied());
    graph
}

/// Graph with a fixed node count and no edges, named after its size.
#[derive(Clone, Debug)]
pub struct Isolated {
    nodes: usize,
}

impl Isolated {
    #[must_use]
    pub fn new(nodes: usize) -> Self {
        Self { nodes }
    }
}

impl GraphSource for Isolated {
    fn node_count(&self) -> usize {
        self.nodes
    }

    fn name(&self) -> &str {
        "isolated"
    }

    fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
        if node < self.nodes {
            Ok(Vec::new())
        } else {
            Err(GraphSourceError::OutOfBounds { index: node })
        }
    }
}

/// Asserts that two floating-point values agree to within `1e-12`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}
