//! Per-node flow resolution.
//!
//! # The junction problem
//!
//! Given a node with `m` incoming and `n` outgoing links, current densities
//! on all of them, and an `m × n` split-ratio matrix, find one flow value per
//! incident link such that
//!
//! - no incoming link sends more than its sending capacity (demand),
//! - no outgoing link receives more than its receiving capacity (supply),
//! - total flow in equals total flow out.
//!
//! # The reduction sweep
//!
//! The resolver runs `n` rounds of proportional capacity limiting, one per
//! outgoing link in index order.  Round `j` computes the provisional inflow
//! to outgoing link `j` from the current (already partially reduced) demands
//! and, if it exceeds the supply of `j`, scales every demand that
//! contributes to `j` by `supply_j / inflow_j`.  Demands with a zero split
//! ratio into `j` pass through the round unchanged.  Reductions carry
//! forward: a demand cut in round `j` enters round `j + 1` already reduced,
//! so one congested turn throttles the whole movement — first-in-first-out
//! across the junction, not priority-based.
//!
//! After the sweep, each incoming link's downstream flow is its fully
//! reduced demand and each outgoing link's upstream flow is the
//! split-weighted sum of those demands; conservation then holds by
//! construction and is verified before the result is released.

use ctm_core::{LinkId, NodeId};
use ctm_network::{Link, Node, NodeKind, TopologyError};

use crate::error::{FlowError, FlowResult};

/// Relative tolerance for the conservation check.  Inflow and outflow totals
/// are accumulated in different orders, so they can differ by a few ulps
/// even though the sweep is algebraically conserving.
const CONSERVATION_EPS: f64 = 1e-9;

// ── JunctionFlows ─────────────────────────────────────────────────────────────

/// The flows resolved at one node, keyed by link.
///
/// `downstream` pairs each of the node's incoming links with its resolved
/// downstream flow; `upstream` pairs each outgoing link with its resolved
/// upstream flow.  A pure value: producing it mutates nothing, so resolution
/// can run for many nodes in parallel against the same pre-step densities
/// and the results applied afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct JunctionFlows {
    pub node: NodeId,
    pub downstream: Vec<(LinkId, f64)>,
    pub upstream: Vec<(LinkId, f64)>,
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// Resolve the flows across `node`'s incident links from current densities.
///
/// Reads only link densities and capacities; writes nothing.  Errors with
/// [`FlowError::Topology`] on source/sink cardinality violations and
/// [`FlowError::Conservation`] if the resolved totals disagree.
pub fn resolve_node(node: &Node, links: &[Link]) -> FlowResult<JunctionFlows> {
    match node.kind {
        NodeKind::Junction => resolve_junction(node, links),
        NodeKind::Source { inflow } => resolve_source(node, inflow),
        NodeKind::Sink => resolve_sink(node, links),
    }
}

fn resolve_junction(node: &Node, links: &[Link]) -> FlowResult<JunctionFlows> {
    let m = node.incoming.len();
    let n = node.outgoing.len();
    let split = &node.split;

    // Receiving capacity of each outgoing link.
    let supplies: Vec<f64> = node.outgoing.iter().map(|&l| links[l.index()].supply()).collect();

    // Capacity-capped sending capacity of each incoming link; reduced in
    // place by the sweep.
    let mut demands: Vec<f64> = node.incoming.iter().map(|&l| links[l.index()].demand()).collect();

    // One round of proportional reduction per outgoing link, in index order.
    for j in 0..n {
        let inflow: f64 = (0..m).map(|i| split.get(i, j) * demands[i]).sum();
        if inflow <= 0.0 {
            // Nothing headed into j; the supply ratio is undefined and the
            // round is a no-op.
            continue;
        }
        let factor = (supplies[j] / inflow).min(1.0);
        if factor < 1.0 {
            for i in 0..m {
                if split.get(i, j) != 0.0 {
                    demands[i] *= factor;
                }
            }
        }
    }

    // Extract per-link flows from the final reduced demands.
    let downstream: Vec<(LinkId, f64)> =
        node.incoming.iter().copied().zip(demands.iter().copied()).collect();
    let upstream: Vec<(LinkId, f64)> = node
        .outgoing
        .iter()
        .enumerate()
        .map(|(j, &l)| (l, (0..m).map(|i| split.get(i, j) * demands[i]).sum()))
        .collect();

    // Totals must agree; a discrepancy means the sweep state was corrupted.
    let inflow_total: f64 = downstream.iter().map(|&(_, q)| q).sum();
    let outflow_total: f64 = upstream.iter().map(|&(_, q)| q).sum();
    let tolerance = CONSERVATION_EPS * inflow_total.abs().max(outflow_total.abs()).max(1.0);
    if (inflow_total - outflow_total).abs() > tolerance {
        return Err(FlowError::Conservation {
            node: node.id,
            inflow: inflow_total,
            outflow: outflow_total,
        });
    }

    Ok(JunctionFlows { node: node.id, downstream, upstream })
}

/// A source injects its configured inflow into its single outgoing link,
/// uncapped by the link's current supply; demand the link cannot absorb is
/// discarded, not queued.
fn resolve_source(node: &Node, inflow: f64) -> FlowResult<JunctionFlows> {
    if !node.incoming.is_empty() || node.outgoing.len() != 1 {
        return Err(FlowError::Topology(TopologyError::SourceCardinality {
            node: node.id,
            incoming: node.incoming.len(),
            outgoing: node.outgoing.len(),
        }));
    }
    Ok(JunctionFlows {
        node: node.id,
        downstream: Vec::new(),
        upstream: vec![(node.outgoing[0], inflow)],
    })
}

/// A sink has infinite receiving capacity: it drains its single incoming
/// link at the link's full sending capacity.
fn resolve_sink(node: &Node, links: &[Link]) -> FlowResult<JunctionFlows> {
    if node.incoming.len() != 1 || !node.outgoing.is_empty() {
        return Err(FlowError::Topology(TopologyError::SinkCardinality {
            node: node.id,
            incoming: node.incoming.len(),
            outgoing: node.outgoing.len(),
        }));
    }
    let link = &links[node.incoming[0].index()];
    Ok(JunctionFlows {
        node: node.id,
        downstream: vec![(link.id, link.demand())],
        upstream: Vec::new(),
    })
}
