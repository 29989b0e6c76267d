//! Netreach core library.
//!
//! Measures how integrated each node of a graph is: for every step count `k`
//! in a configured range, the share of other nodes reachable within `k` hops,
//! reduced across nodes by a pluggable [`Summarizer`].
//!
//! When the `metrics` feature is enabled the aggregator emits:
//!
//! - `integration_nodes_processed` (counter)
//! - `integration_unreachable_pairs` (counter)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod distance;
mod error;
mod graph_source;
mod integration;
mod observer;
#[cfg(feature = "petgraph")]
#[cfg_attr(docsrs, doc(cfg(feature = "petgraph")))]
mod petgraph_source;
mod range;
mod summarizer;
mod table;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::IntegrationBuilder,
    distance::{DistanceList, HopDistance, vertex_distances},
    error::{
        GraphSourceError, GraphSourceErrorCode, IntegrationError, IntegrationErrorCode, Result,
    },
    graph_source::{GraphSource, PathLength},
    integration::Integration,
    observer::{IntegrationObserver, NoopObserver, TracingObserver},
    range::KRange,
    summarizer::{Summarizer, Summary},
    table::{ResultTable, SummaryTable},
};
