//! Diagnostic hooks invoked while integration runs.
//!
//! Observers see intermediate results but cannot change them.

use tracing::debug;

use crate::distance::DistanceList;

/// Receives intermediate results from [`crate::Integration`].
///
/// Every hook defaults to a no-op.
pub trait IntegrationObserver {
    /// Called once per node after its distances are computed.
    fn on_distances(&self, _distances: &DistanceList) {}

    /// Called once per node and step count after reachable nodes are counted.
    fn on_reachable(&self, _node: usize, _k: usize, _reachable: usize) {}
}

/// Observer that ignores every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IntegrationObserver for NoopObserver {}

/// Observer that reports every hook as a `DEBUG` tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IntegrationObserver for TracingObserver {
    fn on_distances(&self, distances: &DistanceList) {
        debug!(
            node = distances.source(),
            reachable = distances.reachable(),
            eccentricity = ?distances.eccentricity(),
            distances = ?distances.entries(),
            "computed node distances"
        );
    }

    fn on_reachable(&self, node: usize, k: usize, reachable: usize) {
        debug!(node, k, reachable, "counted reachable nodes");
    }
}

impl<O: IntegrationObserver + ?Sized> IntegrationObserver for &O {
    fn on_distances(&self, distances: &DistanceList) {
        (**self).on_distances(distances);
    }

    fn on_reachable(&self, node: usize, k: usize, reachable: usize) {
        (**self).on_reachable(node, k, reachable);
    }
}
