//! Error types for the netreach core library.
//!
//! Defines the error enums surfaced by graph sources and the integration
//! aggregator, their stable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::GraphSource`] queries.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphSourceError {
    /// Requested node index was outside the graph.
    #[error("node {index} is out of bounds")]
    OutOfBounds {
        /// The node index that exceeded the graph bounds.
        index: usize,
    },
    /// A shortest-path query returned the wrong number of entries.
    #[error("shortest-path query returned {got} entries but the graph has {expected} nodes")]
    PathCountMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of entries the query produced.
        got: usize,
    },
    /// A shortest-path query labelled a node other than the source as the source.
    #[error("shortest-path query from node {node} labelled node {target} as the source")]
    InconsistentPath {
        /// Node the query was issued from.
        node: usize,
        /// Node that carried the source label.
        target: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphSourceError`] variants.
    enum GraphSourceErrorCode for GraphSourceError {
        /// Requested node index was outside the graph.
        OutOfBounds => OutOfBounds { .. } => "GRAPH_SOURCE_OUT_OF_BOUNDS",
        /// A shortest-path query returned the wrong number of entries.
        PathCountMismatch => PathCountMismatch { .. } => "GRAPH_SOURCE_PATH_COUNT_MISMATCH",
        /// A shortest-path query labelled a node other than the source as the source.
        InconsistentPath => InconsistentPath { .. } => "GRAPH_SOURCE_INCONSISTENT_PATH",
    }
}

/// Error type produced when configuring or running [`crate::Integration`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum IntegrationError {
    /// The k step must be greater than zero.
    #[error("k_step must be at least 1 (got {got})")]
    InvalidKStep {
        /// The invalid step supplied by the caller.
        got: usize,
    },
    /// The graph has too few nodes for a reachable fraction to be defined.
    #[error("graph `{graph}` has {nodes} nodes but integration requires at least 2")]
    TooFewNodes {
        /// Identifier for the undersized graph.
        graph: Arc<str>,
        /// Number of nodes in the graph.
        nodes: usize,
    },
    /// A [`crate::GraphSource`] query failed while computing distances.
    #[error("graph `{graph}` failed: {error}")]
    GraphSource {
        /// Identifier for the graph that produced the error.
        graph: Arc<str>,
        #[source]
        /// Underlying graph source error.
        error: GraphSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`IntegrationError`] variants.
    enum IntegrationErrorCode for IntegrationError {
        /// The k step must be greater than zero.
        InvalidKStep => InvalidKStep { .. } => "INTEGRATION_INVALID_K_STEP",
        /// The graph has too few nodes for a reachable fraction to be defined.
        TooFewNodes => TooFewNodes { .. } => "INTEGRATION_TOO_FEW_NODES",
        /// A [`crate::GraphSource`] query failed while computing distances.
        GraphSourceFailure => GraphSource { .. } => "INTEGRATION_GRAPH_SOURCE_FAILURE",
    }
}

impl IntegrationError {
    /// Retrieve the inner [`GraphSourceErrorCode`] when the error originated in a
    /// [`crate::GraphSource`].
    pub const fn graph_source_code(&self) -> Option<GraphSourceErrorCode> {
        match self {
            Self::GraphSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, IntegrationError>;
