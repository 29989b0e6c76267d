//! Builder utilities for configuring integration runs.
//!
//! Exposes the step-count range and debug switch, validated before
//! constructing [`Integration`] instances.

use std::num::NonZeroUsize;

use crate::{Result, error::IntegrationError, integration::Integration, range::KRange};

/// Configures and constructs [`Integration`] instances.
///
/// # Examples
/// ```
/// use netreach_core::IntegrationBuilder;
///
/// let integration = IntegrationBuilder::new()
///     .with_min_k(1)
///     .with_max_k(5)
///     .with_k_step(2)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(integration.k_range().iter().collect::<Vec<_>>(), vec![1, 3]);
/// assert!(!integration.debug());
/// ```
#[derive(Debug, Clone)]
pub struct IntegrationBuilder {
    min_k: usize,
    max_k: usize,
    k_step: usize,
    debug: bool,
}

impl Default for IntegrationBuilder {
    fn default() -> Self {
        Self {
            min_k: 0,
            max_k: 1,
            k_step: 1,
            debug: false,
        }
    }
}

impl IntegrationBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use netreach_core::IntegrationBuilder;
    ///
    /// let builder = IntegrationBuilder::new();
    /// assert_eq!(builder.min_k(), 0);
    /// assert_eq!(builder.max_k(), 1);
    /// assert_eq!(builder.k_step(), 1);
    /// assert!(!builder.debug());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the first step count considered.
    #[must_use]
    pub fn with_min_k(mut self, min_k: usize) -> Self {
        self.min_k = min_k;
        self
    }

    /// Returns the configured first step count.
    #[must_use]
    pub fn min_k(&self) -> usize {
        self.min_k
    }

    /// Overrides the exclusive upper bound on step counts.
    #[must_use]
    pub fn with_max_k(mut self, max_k: usize) -> Self {
        self.max_k = max_k;
        self
    }

    /// Returns the configured exclusive upper bound.
    #[must_use]
    pub fn max_k(&self) -> usize {
        self.max_k
    }

    /// Overrides the stride between step counts.
    ///
    /// # Examples
    /// ```
    /// use netreach_core::IntegrationBuilder;
    ///
    /// let builder = IntegrationBuilder::new().with_k_step(3);
    /// assert_eq!(builder.k_step(), 3);
    /// ```
    #[must_use]
    pub fn with_k_step(mut self, k_step: usize) -> Self {
        self.k_step = k_step;
        self
    }

    /// Returns the configured stride.
    #[must_use]
    pub fn k_step(&self) -> usize {
        self.k_step
    }

    /// Enables or disables debug diagnostics.
    ///
    /// When enabled, [`Integration::run`] and [`Integration::run_with`] report
    /// intermediate distances and counts as `DEBUG` tracing events.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns whether debug diagnostics are enabled.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Validates the configuration and constructs an [`Integration`] instance.
    ///
    /// An empty range (`min_k >= max_k`) is valid.
    ///
    /// # Errors
    /// Returns [`IntegrationError::InvalidKStep`] when the stride is zero.
    ///
    /// # Examples
    /// ```
    /// use netreach_core::{IntegrationBuilder, IntegrationError};
    ///
    /// let err = IntegrationBuilder::new().with_k_step(0).build().unwrap_err();
    /// assert_eq!(err, IntegrationError::InvalidKStep { got: 0 });
    /// ```
    pub fn build(self) -> Result<Integration> {
        let k_step = NonZeroUsize::new(self.k_step)
            .ok_or(IntegrationError::InvalidKStep { got: self.k_step })?;

        Ok(Integration::new(
            KRange::new(self.min_k, self.max_k, k_step),
            self.debug,
        ))
    }
}
