//! Graph source abstractions for the netreach core runtime.
//!
//! [`GraphSource`] is the seam between the aggregator and whichever graph
//! library owns the caller's graph. Implementations only need to report their
//! size and out-neighbours; the shortest-path query has a breadth-first default
//! that adapters may replace with their library's own routine.

use std::{collections::VecDeque, num::NonZeroUsize};

use crate::error::GraphSourceError;

/// Outcome of a single-source shortest-path query for one target node.
///
/// The source node is reported as [`PathLength::Source`] rather than as a
/// zero-length path so it can never be confused with an unreachable target.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use netreach_core::PathLength;
///
/// let hops = NonZeroUsize::new(2).expect("two is non-zero");
/// assert_eq!(PathLength::Hops(hops).hops(), Some(2));
/// assert_eq!(PathLength::Unreachable.hops(), None);
/// assert_eq!(PathLength::Source.hops(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathLength {
    /// The target is the node the query was issued from.
    Source,
    /// The target is reachable in the given number of edges.
    Hops(NonZeroUsize),
    /// No directed path leads to the target.
    Unreachable,
}

impl PathLength {
    /// Returns the hop count when the target is reachable.
    #[must_use]
    pub fn hops(self) -> Option<usize> {
        match self {
            Self::Hops(hops) => Some(hops.get()),
            Self::Source | Self::Unreachable => None,
        }
    }
}

/// Abstraction over a read-only graph that can answer hop-distance queries.
///
/// Nodes are identified by dense indices in `0..node_count()`.
///
/// # Examples
/// ```
/// use netreach_core::{GraphSource, GraphSourceError, PathLength};
///
/// struct Chain(usize);
///
/// impl GraphSource for Chain {
///     fn node_count(&self) -> usize { self.0 }
///     fn name(&self) -> &str { "chain" }
///     fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
///         if node >= self.0 {
///             return Err(GraphSourceError::OutOfBounds { index: node });
///         }
///         Ok((node + 1 < self.0).then_some(node + 1).into_iter().collect())
///     }
/// }
///
/// let chain = Chain(3);
/// let lengths = chain.shortest_path_lengths(0)?;
/// assert_eq!(lengths[0], PathLength::Source);
/// assert_eq!(lengths[2].hops(), Some(2));
/// assert_eq!(chain.shortest_path_lengths(2)?[0], PathLength::Unreachable);
/// # Ok::<(), GraphSourceError>(())
/// ```
pub trait GraphSource {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns whether the graph contains no nodes.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Returns a human-readable name used in errors and diagnostics.
    fn name(&self) -> &str {
        "graph"
    }

    /// Returns the nodes reachable from `node` over a single edge.
    ///
    /// Directed graphs report out-edges only. Duplicate entries and self-loops
    /// are tolerated.
    ///
    /// # Errors
    /// Returns [`GraphSourceError::OutOfBounds`] when `node` is not a valid
    /// index.
    fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError>;

    /// Computes the hop distance from `source` to every node, in index order.
    ///
    /// The default implementation runs a breadth-first search over
    /// [`GraphSource::out_neighbours`]. Entry `source` is always
    /// [`PathLength::Source`].
    ///
    /// # Errors
    /// Returns [`GraphSourceError::OutOfBounds`] when `source` or any reported
    /// neighbour is not a valid index.
    fn shortest_path_lengths(&self, source: usize) -> Result<Vec<PathLength>, GraphSourceError> {
        let mut lengths = vec![PathLength::Unreachable; self.node_count()];
        *lengths
            .get_mut(source)
            .ok_or(GraphSourceError::OutOfBounds { index: source })? = PathLength::Source;
        let mut frontier = VecDeque::from([(source, 0_usize)]);

        while let Some((node, depth)) = frontier.pop_front() {
            let next_depth = depth.saturating_add(1);
            for neighbour in self.out_neighbours(node)? {
                let slot = lengths
                    .get_mut(neighbour)
                    .ok_or(GraphSourceError::OutOfBounds { index: neighbour })?;
                if *slot != PathLength::Unreachable {
                    continue;
                }
                if let Some(hops) = NonZeroUsize::new(next_depth) {
                    *slot = PathLength::Hops(hops);
                    frontier.push_back((neighbour, next_depth));
                }
            }
        }
        Ok(lengths)
    }
}

impl<G: GraphSource + ?Sized> GraphSource for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn out_neighbours(&self, node: usize) -> Result<Vec<usize>, GraphSourceError> {
        (**self).out_neighbours(node)
    }

    fn shortest_path_lengths(&self, source: usize) -> Result<Vec<PathLength>, GraphSourceError> {
        (**self).shortest_path_lengths(source)
    }
}
