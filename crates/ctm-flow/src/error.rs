//! Flow-resolution error type.

use thiserror::Error;

use ctm_core::NodeId;
use ctm_network::TopologyError;

/// Errors raised while resolving flows or stepping the network.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A node's resolved inflow and outflow totals disagree beyond
    /// tolerance.  Always fatal: the reduction pass is conserving by
    /// construction, so a discrepancy means the resolution state was
    /// corrupted.  Never silently absorbed.
    #[error(
        "flow not conserved at {node}: {inflow} veh/h in vs {outflow} veh/h out"
    )]
    Conservation { node: NodeId, inflow: f64, outflow: f64 },

    /// A structural violation surfaced at resolution time (source/sink link
    /// cardinality).
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Shorthand result type for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;
