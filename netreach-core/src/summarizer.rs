//! Reductions that collapse one k-column of node scores into a single value.

use std::fmt;

/// Reduces the per-node scores for one step count to a single value.
///
/// Any `Fn(&[f64]) -> f64` closure is a summarizer, so callers can plug in
/// their own statistic without defining a type.
///
/// # Examples
/// ```
/// use netreach_core::{Summarizer, Summary};
///
/// assert_eq!(Summary::Max.summarize(&[0.25, 0.75, 0.5]), 0.75);
///
/// let spread = |values: &[f64]| {
///     let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
///     let min = values.iter().copied().fold(f64::INFINITY, f64::min);
///     max - min
/// };
/// assert_eq!(spread.summarize(&[0.25, 0.75, 0.5]), 0.5);
/// ```
pub trait Summarizer {
    /// Collapses `values` into one number.
    fn summarize(&self, values: &[f64]) -> f64;
}

impl<F> Summarizer for F
where
    F: Fn(&[f64]) -> f64,
{
    fn summarize(&self, values: &[f64]) -> f64 {
        self(values)
    }
}

/// Built-in summaries. An empty slice summarizes to NaN for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Summary {
    /// Arithmetic mean.
    #[default]
    Mean,
    /// Middle value, or the mean of the two middle values for even lengths.
    Median,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
}

impl Summary {
    /// Returns the lowercase name of the summary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Summarizer for Summary {
    fn summarize(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        match self {
            Self::Mean => mean(values),
            Self::Median => median(values),
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "the mean is defined over floating-point scores."
)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[expect(
    clippy::float_arithmetic,
    reason = "even-length medians average the two middle scores."
)]
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    match (sorted.get(middle.wrapping_sub(1)), sorted.get(middle)) {
        (Some(low), Some(high)) if sorted.len() % 2 == 0 => (low + high) / 2.0,
        (_, Some(value)) => *value,
        _ => f64::NAN,
    }
}
