//! Step-count ranges.

use std::{iter::StepBy, num::NonZeroUsize, ops::Range};

/// Half-open range of step counts `[min_k, max_k)` visited every `k_step`.
///
/// `max_k` itself is never visited. A range with `min_k >= max_k` is empty.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use netreach_core::KRange;
///
/// let step = NonZeroUsize::new(2).expect("two is non-zero");
/// let range = KRange::new(1, 6, step);
/// assert_eq!(range.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
/// assert_eq!(range.len(), 3);
/// assert!(KRange::new(4, 4, NonZeroUsize::MIN).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KRange {
    min_k: usize,
    max_k: usize,
    k_step: NonZeroUsize,
}

impl KRange {
    /// Creates a range over `[min_k, max_k)` with the given step.
    #[must_use]
    pub const fn new(min_k: usize, max_k: usize, k_step: NonZeroUsize) -> Self {
        Self {
            min_k,
            max_k,
            k_step,
        }
    }

    /// Returns the first step count.
    #[must_use]
    pub const fn min_k(&self) -> usize {
        self.min_k
    }

    /// Returns the exclusive upper bound.
    #[must_use]
    pub const fn max_k(&self) -> usize {
        self.max_k
    }

    /// Returns the stride between visited step counts.
    #[must_use]
    pub const fn k_step(&self) -> NonZeroUsize {
        self.k_step
    }

    /// Iterates the step counts in ascending order.
    #[must_use]
    pub fn iter(&self) -> StepBy<Range<usize>> {
        (self.min_k..self.max_k).step_by(self.k_step.get())
    }

    /// Returns how many step counts the range visits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().len()
    }

    /// Returns whether the range visits no step counts.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_k >= self.max_k
    }
}

impl IntoIterator for KRange {
    type Item = usize;
    type IntoIter = StepBy<Range<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
