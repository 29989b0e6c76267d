//! Property tests for reachable-fraction tables on random directed graphs.
#![cfg(feature = "petgraph")]

use netreach_core::{
    GraphSource, Integration, IntegrationBuilder, PathLength, Summary, vertex_distances,
};
use netreach_test_support::proptest_profile::suite_config;
use petgraph::graph::DiGraph;
use proptest::prelude::*;

const MAX_NODES: usize = 12;

/// Random digraphs with `2..=MAX_NODES` nodes; isolated nodes are kept.
fn graph_strategy() -> impl Strategy<Value = DiGraph<(), ()>> {
    (2..=MAX_NODES).prop_flat_map(|nodes| {
        let bound = u32::try_from(nodes).unwrap_or(u32::MAX);
        prop::collection::vec((0..bound, 0..bound), 0..=nodes * 2).prop_map(move |edges| {
            let mut graph = DiGraph::with_capacity(nodes, edges.len());
            for _ in 0..nodes {
                graph.add_node(());
            }
            graph.extend_with_edges(edges);
            graph
        })
    })
}

/// Covers every k from 0 up to and including the longest possible path.
fn full_range(graph: &DiGraph<(), ()>) -> Integration {
    IntegrationBuilder::new()
        .with_max_k(graph.node_count() + 1)
        .build()
        .expect("unit step is valid")
}

/// Breadth-first reference that never touches petgraph's shortest paths.
struct Neighbours<'a>(&'a DiGraph<(), ()>);

impl GraphSource for Neighbours<'_> {
    fn node_count(&self) -> usize {
        self.0.node_count()
    }

    fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, netreach_core::GraphSourceError> {
        GraphSource::out_neighbours(self.0, node)
    }
}

proptest! {
    #![proptest_config(suite_config(128))]

    #[test]
    fn fractions_stay_within_unit_interval(graph in graph_strategy()) {
        let table = full_range(&graph).node_table(&graph).expect("run must succeed");
        for node in 0..table.node_count() {
            let row = table.row(node).expect("every node has a row");
            prop_assert!(row.iter().all(|value| (0.0..=1.0).contains(value)), "row {node}: {row:?}");
        }
    }

    #[test]
    fn fractions_never_decrease_with_k(graph in graph_strategy()) {
        let table = full_range(&graph).node_table(&graph).expect("run must succeed");
        for node in 0..table.node_count() {
            let row = table.row(node).expect("every node has a row");
            prop_assert!(row.windows(2).all(|pair| pair[0] <= pair[1]), "row {node}: {row:?}");
        }
    }

    #[test]
    fn fractions_saturate_at_total_reachability(graph in graph_strategy()) {
        let table = full_range(&graph).node_table(&graph).expect("run must succeed");
        let others = (graph.node_count() - 1) as f64;
        for node in 0..graph.node_count() {
            let distances = vertex_distances(&graph, node).expect("node is valid");
            let saturated = distances.reachable() as f64 / others;
            let first = distances.eccentricity().unwrap_or(0);
            for &k in table.ks().iter().filter(|&&k| k >= first) {
                let value = table.get(node, k).expect("cell exists");
                prop_assert!((value - saturated).abs() < 1e-12, "node {node}, k {k}: {value} vs {saturated}");
            }
        }
    }

    #[test]
    fn distance_lists_cover_every_other_node(graph in graph_strategy()) {
        for node in 0..graph.node_count() {
            let distances = vertex_distances(&graph, node).expect("node is valid");
            prop_assert_eq!(distances.len(), graph.node_count() - 1);
        }
    }

    #[test]
    fn summarizer_choice_does_not_alter_the_table(graph in graph_strategy()) {
        let integration = full_range(&graph);
        let table = integration.node_table(&graph).expect("run must succeed");
        for summary in [Summary::Mean, Summary::Median, Summary::Min, Summary::Max] {
            let summarized = integration.run_with(&graph, &summary).expect("run must succeed");
            prop_assert_eq!(summarized, table.summarize(&summary));
        }
    }

    #[test]
    fn petgraph_paths_match_breadth_first_search(graph in graph_strategy()) {
        let reference = Neighbours(&graph);
        for node in 0..graph.node_count() {
            let expected = reference.shortest_path_lengths(node).expect("node is valid");
            let actual = graph.shortest_path_lengths(node).expect("node is valid");
            prop_assert_eq!(actual.get(node).copied(), Some(PathLength::Source));
            prop_assert_eq!(actual, expected);
        }
    }
}
