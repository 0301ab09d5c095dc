//! Topology error type.

use thiserror::Error;

use ctm_core::{DomainError, NodeId};

/// Errors raised while assembling or validating network topology.
///
/// All of these indicate a structural defect in the input; none is
/// recoverable by retrying.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("link {from}->{to} has zero or non-finite length")]
    ZeroLengthLink { from: NodeId, to: NodeId },

    #[error("initial density on link {from}->{to}: {source}")]
    InitialDensity {
        from: NodeId,
        to: NodeId,
        #[source]
        source: DomainError,
    },

    #[error(
        "source {node} must have 0 incoming and 1 outgoing links, has {incoming} and {outgoing}"
    )]
    SourceCardinality { node: NodeId, incoming: usize, outgoing: usize },

    #[error(
        "sink {node} must have 1 incoming and 0 outgoing links, has {incoming} and {outgoing}"
    )]
    SinkCardinality { node: NodeId, incoming: usize, outgoing: usize },

    #[error("junction {node} has incoming links but no outgoing links")]
    DeadEnd { node: NodeId },

    #[error(
        "split-ratio matrix for node {node} has shape ({got_rows}, {got_cols}), \
         expected ({rows}, {cols})"
    )]
    SplitShape { node: NodeId, rows: usize, cols: usize, got_rows: usize, got_cols: usize },

    #[error("split-ratio row {row} is not the same length as row 0")]
    SplitRagged { row: usize },

    #[error("split ratio at ({row}, {col}) is {value}, must be in [0, 1]")]
    SplitEntryRange { row: usize, col: usize, value: f64 },

    #[error("split-ratio row {row} sums to {sum}, must sum to 1")]
    SplitRowSum { row: usize, sum: f64 },
}

/// Shorthand result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
