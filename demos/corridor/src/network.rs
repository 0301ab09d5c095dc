//! The demo corridor topology.
//!
//! ```text
//!                     bypass mid
//!                    ╱          ╲
//! source → split junction        merge junction → sink
//!                    ╲          ╱
//!                     (arterial)
//! ```
//!
//! A source feeds a split junction that sends 70 % of traffic down a direct
//! arterial and 30 % over a longer bypass; the two routes rejoin at a merge
//! junction ahead of the sink.  The arterial starts moderately loaded, the
//! bypass nearly empty.

use anyhow::Result;

use ctm_core::{FundamentalDiagram, LinkId, Point};
use ctm_network::{BuildDiagnostic, Network, NetworkBuilder, SplitMatrix};

/// Link ids of the built corridor, in registration order.
pub struct CorridorLinks {
    pub feeder: LinkId,
    pub arterial: LinkId,
    pub bypass_in: LinkId,
    pub bypass_out: LinkId,
    pub exit: LinkId,
}

pub fn build_corridor(inflow: f64) -> Result<(Network, Vec<BuildDiagnostic>, CorridorLinks)> {
    // 1800 veh/h arterial lanes everywhere; the bypass is slower metal but
    // the same fundamental diagram keeps the demo easy to reason about.
    let fd = FundamentalDiagram::new(1800.0, 33.7, 6.9)?;

    let mut b = NetworkBuilder::new();
    let source = b.add_source(Point::new(0.0, 0.0), inflow);
    let split = b.add_junction(Point::new(1.0, 0.0));
    let bypass_mid = b.add_junction(Point::new(2.5, 1.5));
    let merge = b.add_junction(Point::new(4.0, 0.0));
    let sink = b.add_sink(Point::new(5.0, 0.0));

    let links = CorridorLinks {
        feeder: b.add_link(source, split, fd, 25.0)?,
        arterial: b.add_link(split, merge, fd, 30.0)?,
        bypass_in: b.add_link(split, bypass_mid, fd, 5.0)?,
        bypass_out: b.add_link(bypass_mid, merge, fd, 5.0)?,
        exit: b.add_link(merge, sink, fd, 20.0)?,
    };

    // 70 % stays on the arterial, 30 % takes the bypass.  The other
    // junctions keep the uniform default (surfaced as diagnostics).
    b.set_turning_ratios(split, SplitMatrix::from_rows(&[vec![0.7, 0.3]])?)?;

    let (net, diagnostics) = b.build()?;
    Ok((net, diagnostics, links))
}
