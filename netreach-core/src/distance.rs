//! Per-node hop distances.
//!
//! [`vertex_distances`] turns one shortest-path query into a [`DistanceList`]:
//! the hop distance from a source node to every other node, in index order,
//! with the source itself left out.

use std::num::NonZeroUsize;

use crate::{
    error::GraphSourceError,
    graph_source::{GraphSource, PathLength},
};

/// Hop distance from a source node to one other node.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use netreach_core::HopDistance;
///
/// let one = HopDistance::Reachable(NonZeroUsize::MIN);
/// assert!(one.is_within(1));
/// assert!(!one.is_within(0));
/// assert!(!HopDistance::Unreachable.is_within(usize::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HopDistance {
    /// The node is reachable in the given number of edges.
    Reachable(NonZeroUsize),
    /// No directed path reaches the node.
    Unreachable,
}

impl HopDistance {
    /// Returns whether the node is reachable within `k` hops.
    #[must_use]
    pub fn is_within(self, k: usize) -> bool {
        match self {
            Self::Reachable(hops) => hops.get() <= k,
            Self::Unreachable => false,
        }
    }

    /// Returns the hop count when the node is reachable.
    #[must_use]
    pub fn hops(self) -> Option<usize> {
        match self {
            Self::Reachable(hops) => Some(hops.get()),
            Self::Unreachable => None,
        }
    }
}

/// Hop distances from one source node to every other node.
///
/// Entries follow node-index order with the source omitted, so a list for an
/// `N`-node graph always holds `N - 1` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceList {
    source: usize,
    entries: Vec<HopDistance>,
}

impl DistanceList {
    /// Returns the node the distances were measured from.
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the distances in node-index order, source omitted.
    #[must_use]
    pub fn entries(&self) -> &[HopDistance] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the list has no entries, which only happens for a
    /// single-node graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts the nodes reachable within `k` hops.
    ///
    /// # Examples
    /// ```
    /// use netreach_core::{GraphSource, GraphSourceError, vertex_distances};
    ///
    /// struct Star;
    ///
    /// impl GraphSource for Star {
    ///     fn node_count(&self) -> usize { 4 }
    ///     fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
    ///         match node {
    ///             0 => Ok(vec![1, 2]),
    ///             1 => Ok(vec![3]),
    ///             2 | 3 => Ok(Vec::new()),
    ///             index => Err(GraphSourceError::OutOfBounds { index }),
    ///         }
    ///     }
    /// }
    ///
    /// let distances = vertex_distances(&Star, 0)?;
    /// assert_eq!(distances.reachable_within(0), 0);
    /// assert_eq!(distances.reachable_within(1), 2);
    /// assert_eq!(distances.reachable_within(2), 3);
    /// # Ok::<(), GraphSourceError>(())
    /// ```
    #[must_use]
    pub fn reachable_within(&self, k: usize) -> usize {
        self.entries.iter().filter(|entry| entry.is_within(k)).count()
    }

    /// Counts the nodes reachable at any distance.
    #[must_use]
    pub fn reachable(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, HopDistance::Reachable(_)))
            .count()
    }

    /// Returns the longest finite distance, or `None` when nothing is reachable.
    #[must_use]
    pub fn eccentricity(&self) -> Option<usize> {
        self.entries.iter().filter_map(|entry| entry.hops()).max()
    }

    /// Encodes the list as plain integers with unreachable nodes mapped to
    /// `max_k + 1`, a value no k in `[.., max_k)` can reach.
    ///
    /// # Examples
    /// ```
    /// use netreach_core::{GraphSource, GraphSourceError, vertex_distances};
    ///
    /// struct Pair;
    ///
    /// impl GraphSource for Pair {
    ///     fn node_count(&self) -> usize { 3 }
    ///     fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
    ///         match node {
    ///             0 => Ok(vec![1]),
    ///             1 | 2 => Ok(Vec::new()),
    ///             index => Err(GraphSourceError::OutOfBounds { index }),
    ///         }
    ///     }
    /// }
    ///
    /// let distances = vertex_distances(&Pair, 0)?;
    /// assert_eq!(distances.to_sentinel_encoded(3), vec![1, 4]);
    /// # Ok::<(), GraphSourceError>(())
    /// ```
    #[must_use]
    pub fn to_sentinel_encoded(&self, max_k: usize) -> Vec<usize> {
        let sentinel = max_k.saturating_add(1);
        self.entries
            .iter()
            .map(|entry| entry.hops().unwrap_or(sentinel))
            .collect()
    }
}

/// Computes the hop distance from `node` to every other node of `graph`.
///
/// # Errors
/// Returns [`GraphSourceError::OutOfBounds`] for an invalid `node`,
/// [`GraphSourceError::PathCountMismatch`] when the graph's query does not
/// cover every node, and [`GraphSourceError::InconsistentPath`] when the query
/// labels another node as the source.
pub fn vertex_distances<G>(graph: &G, node: usize) -> Result<DistanceList, GraphSourceError>
where
    G: GraphSource + ?Sized,
{
    let nodes = graph.node_count();
    if node >= nodes {
        return Err(GraphSourceError::OutOfBounds { index: node });
    }

    let lengths = graph.shortest_path_lengths(node)?;
    if lengths.len() != nodes {
        return Err(GraphSourceError::PathCountMismatch {
            expected: nodes,
            got: lengths.len(),
        });
    }

    let mut entries = Vec::with_capacity(nodes.saturating_sub(1));
    for (target, length) in lengths.into_iter().enumerate() {
        if target == node {
            continue;
        }
        let entry = match length {
            PathLength::Hops(hops) => HopDistance::Reachable(hops),
            PathLength::Unreachable => HopDistance::Unreachable,
            PathLength::Source => {
                return Err(GraphSourceError::InconsistentPath { node, target });
            }
        };
        entries.push(entry);
    }

    Ok(DistanceList {
        source: node,
        entries,
    })
}
