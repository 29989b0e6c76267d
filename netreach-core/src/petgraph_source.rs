//! [`GraphSource`] adapter for `petgraph` graphs.
//!
//! Directed graphs are traversed along outgoing edges; undirected graphs along
//! every edge. Shortest paths come from `petgraph::algo::dijkstra` with a unit
//! cost per edge, so edge weights are ignored.

use std::num::NonZeroUsize;

use petgraph::{
    EdgeType,
    algo::dijkstra,
    graph::{Graph, IndexType, NodeIndex},
};

use crate::{
    error::GraphSourceError,
    graph_source::{GraphSource, PathLength},
};

/// # Examples
/// ```
/// use netreach_core::{GraphSource, PathLength};
/// use petgraph::graph::DiGraph;
///
/// let graph = DiGraph::<(), ()>::from_edges([(0_u32, 1), (1, 2)]);
/// let lengths = graph.shortest_path_lengths(0)?;
/// assert_eq!(lengths[0], PathLength::Source);
/// assert_eq!(lengths[2].hops(), Some(2));
/// assert_eq!(graph.shortest_path_lengths(2)?[0], PathLength::Unreachable);
/// # Ok::<(), netreach_core::GraphSourceError>(())
/// ```
impl<N, E, Ty, Ix> GraphSource for Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn name(&self) -> &str {
        if self.is_directed() {
            "petgraph-directed"
        } else {
            "petgraph-undirected"
        }
    }

    fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
        let index = checked_index(self, node)?;
        Ok(self.neighbors(index).map(|next| next.index()).collect())
    }

    fn shortest_path_lengths(&self, source: usize) -> Result<Vec<PathLength>, GraphSourceError> {
        let start = checked_index(self, source)?;
        let hops = dijkstra(self, start, None, |_| 1_usize);

        Ok((0..Graph::node_count(self))
            .map(|target| {
                if target == source {
                    return PathLength::Source;
                }
                hops.get(&NodeIndex::new(target))
                    .copied()
                    .and_then(NonZeroUsize::new)
                    .map_or(PathLength::Unreachable, PathLength::Hops)
            })
            .collect())
    }
}

fn checked_index<N, E, Ty, Ix>(
    graph: &Graph<N, E, Ty, Ix>,
    node: usize,
) -> Result<NodeIndex<Ix>, GraphSourceError>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    if node < Graph::node_count(graph) {
        Ok(NodeIndex::new(node))
    } else {
        Err(GraphSourceError::OutOfBounds { index: node })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};
    use rstest::rstest;

    fn hops(value: usize) -> PathLength {
        PathLength::Hops(NonZeroUsize::new(value).expect("hop counts in tests are non-zero"))
    }

    fn path_graph_directed() -> DiGraph<(), ()> {
        let mut graph = DiGraph::with_capacity(4, 2);
        for _ in 0..4 {
            graph.add_node(());
        }
        graph.extend_with_edges([(0_u32, 1), (1, 2)]);
        graph
    }

    #[rstest]
    fn directed_graphs_follow_outgoing_edges_only() {
        let graph = path_graph_directed();
        assert_eq!(
            graph.shortest_path_lengths(1).expect("node is valid"),
            vec![PathLength::Unreachable, PathLength::Source, hops(1), PathLength::Unreachable]
        );
        assert_eq!(graph.out_neighbours(2).expect("node is valid"), Vec::<usize>::new());
        assert_eq!(GraphSource::name(&graph), "petgraph-directed");
    }

    #[rstest]
    fn undirected_graphs_follow_edges_both_ways() {
        let mut graph = UnGraph::<(), ()>::from_edges([(0_u32, 1), (1, 2)]);
        graph.add_node(());
        assert_eq!(
            graph.shortest_path_lengths(2).expect("node is valid"),
            vec![hops(2), hops(1), PathLength::Source, PathLength::Unreachable]
        );
        let mut neighbours = graph.out_neighbours(1).expect("node is valid");
        neighbours.sort_unstable();
        assert_eq!(neighbours, vec![0, 2]);
        assert_eq!(GraphSource::name(&graph), "petgraph-undirected");
    }

    #[rstest]
    fn edge_weights_do_not_affect_hop_counts() {
        let graph = DiGraph::<(), u32>::from_edges([(0_u32, 1, 100), (1, 2, 100), (0, 2, 1_000)]);
        let lengths = graph.shortest_path_lengths(0).expect("node is valid");
        assert_eq!(lengths.get(2).copied(), Some(hops(1)));
    }

    #[rstest]
    #[case(4)]
    #[case(usize::MAX)]
    fn out_of_range_nodes_are_rejected(#[case] node: usize) {
        let graph = path_graph_directed();
        assert_eq!(
            graph.shortest_path_lengths(node),
            Err(GraphSourceError::OutOfBounds { index: node })
        );
        assert_eq!(
            graph.out_neighbours(node),
            Err(GraphSourceError::OutOfBounds { index: node })
        );
    }

    #[rstest]
    fn agrees_with_breadth_first_default() {
        struct Bfs<'a>(&'a DiGraph<(), ()>);

        impl GraphSource for Bfs<'_> {
            fn node_count(&self) -> usize {
                self.0.node_count()
            }

            fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
                GraphSource::out_neighbours(self.0, node)
            }
        }

        let graph = DiGraph::<(), ()>::from_edges([(0_u32, 1), (1, 2), (2, 0), (2, 3), (4, 3)]);
        let bfs = Bfs(&graph);
        for source in 0..graph.node_count() {
            assert_eq!(
                graph.shortest_path_lengths(source).expect("node is valid"),
                bfs.shortest_path_lengths(source).expect("node is valid"),
                "disagreement from node {source}",
            );
        }
    }
}
