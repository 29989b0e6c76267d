//! Result tables produced by integration runs.
//!
//! [`ResultTable`] holds the reachable fraction for every node and step count;
//! [`SummaryTable`] holds one summarized value per step count.

use crate::summarizer::Summarizer;

/// Reachable fractions indexed by node (rows) and step count (columns).
///
/// Tables are produced by [`crate::Integration::node_table`]; every row covers
/// every column.
///
/// # Examples
/// ```
/// use netreach_core::{GraphSource, GraphSourceError, IntegrationBuilder, Summary};
///
/// /// 0 -> 1, with node 2 isolated.
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
/// let table = IntegrationBuilder::new()
///     .with_min_k(1)
///     .with_max_k(3)
///     .build()?
///     .node_table(&Pair)?;
///
/// assert_eq!(table.get(0, 2), Some(0.5));
/// assert_eq!(table.column(1), Some(vec![0.5, 0.0, 0.0]));
/// assert_eq!(table.summarize(&Summary::Max).get(2), Some(0.5));
/// # Ok::<(), netreach_core::IntegrationError>(())
/// ```
///
/// Rows cannot be appended from outside the crate:
///
/// ```compile_fail
/// use netreach_core::ResultTable;
///
/// let mut table = ResultTable::new(vec![1, 2]);
/// table.push_row(vec![0.5]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    ks: Vec<usize>,
    rows: Vec<Vec<f64>>,
}

impl ResultTable {
    /// Creates an empty table with one column per step count.
    #[must_use]
    pub(crate) fn new(ks: Vec<usize>) -> Self {
        Self {
            ks,
            rows: Vec::new(),
        }
    }

    /// Appends the row for the next node.
    ///
    /// # Panics
    /// Panics when `row` does not have one value per column.
    pub(crate) fn push_row(&mut self, row: Vec<f64>) {
        assert_eq!(
            row.len(),
            self.ks.len(),
            "row must have one value per step count"
        );
        self.rows.push(row);
    }

    /// Returns the step counts in column order.
    #[must_use]
    pub fn ks(&self) -> &[usize] {
        &self.ks
    }

    /// Returns how many node rows the table holds.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row for `node`.
    #[must_use]
    pub fn row(&self, node: usize) -> Option<&[f64]> {
        self.rows.get(node).map(Vec::as_slice)
    }

    /// Returns the value at `(node, k)`.
    #[must_use]
    pub fn get(&self, node: usize, k: usize) -> Option<f64> {
        let column = self.column_index(k)?;
        self.rows.get(node)?.get(column).copied()
    }

    /// Returns every node's value for step count `k`.
    #[must_use]
    pub fn column(&self, k: usize) -> Option<Vec<f64>> {
        let column = self.column_index(k)?;
        self.rows
            .iter()
            .map(|row| row.get(column).copied())
            .collect()
    }

    /// Reduces each column with `summarizer`, keeping column order.
    #[must_use]
    pub fn summarize<S: Summarizer + ?Sized>(&self, summarizer: &S) -> SummaryTable {
        let mut scratch = Vec::with_capacity(self.rows.len());
        let entries = self
            .ks
            .iter()
            .enumerate()
            .map(|(column, &k)| {
                scratch.clear();
                scratch.extend(self.rows.iter().filter_map(|row| row.get(column).copied()));
                (k, summarizer.summarize(&scratch))
            })
            .collect();
        SummaryTable { entries }
    }

    fn column_index(&self, k: usize) -> Option<usize> {
        self.ks.iter().position(|&candidate| candidate == k)
    }
}

/// One summarized value per step count, in ascending step-count order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    entries: Vec<(usize, f64)>,
}

impl SummaryTable {
    /// Returns the value summarized for step count `k`.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == k)
            .map(|&(_, value)| value)
    }

    /// Returns the `(k, value)` pairs in ascending `k` order.
    #[must_use]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Iterates the step counts in ascending order.
    pub fn ks(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(k, _)| k)
    }

    /// Iterates the summarized values in step-count order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|&(_, value)| value)
    }

    /// Returns how many step counts were summarized.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the range was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
