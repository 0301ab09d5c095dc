//! The two-phase step engine.

use ctm_network::Network;

use crate::error::FlowResult;
use crate::junction::{resolve_node, JunctionFlows};

/// Drives one simulation step over a [`Network`]: resolve all node flows
/// from pre-step densities, apply them to the links' transient slots, then
/// advance every link's density.
///
/// The engine owns the buffer of per-node resolution results so the
/// allocation is reused across steps.
///
/// # Determinism and parallelism
///
/// Resolution reads only densities (immutable during the phase) and produces
/// pure [`JunctionFlows`] values, so with the `parallel` feature the resolve
/// phase fans out across Rayon's pool.  The apply phase stays sequential in
/// node order; since every link flow slot has exactly one writing node, the
/// result is identical either way.  Link updates touch only their own link
/// and parallelize trivially.
pub struct FlowEngine {
    resolved: Vec<JunctionFlows>,
}

impl FlowEngine {
    pub fn new() -> Self {
        Self { resolved: Vec::new() }
    }

    /// Advance the network by one step of `dt_hours`.
    ///
    /// `dt_hours` must respect the network's kinematic stability bound
    /// ([`Network::max_stable_step_hours`]) for densities to remain in
    /// range; the engine does not check it.
    pub fn step(&mut self, network: &mut Network, dt_hours: f64) -> FlowResult<()> {
        self.resolve_flows(network)?;
        update_links(network, dt_hours);
        Ok(())
    }

    /// Phase ① + ②: resolve every node against pre-step densities, then
    /// write the resolved flows into the links' transient slots.
    pub fn resolve_flows(&mut self, network: &mut Network) -> FlowResult<()> {
        let (nodes, links) = network.nodes_and_links_mut();

        // ── Resolve (produce) ─────────────────────────────────────────────
        #[cfg(not(feature = "parallel"))]
        {
            self.resolved.clear();
            self.resolved.reserve(nodes.len());
            for node in nodes {
                self.resolved.push(resolve_node(node, links)?);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let links_ro: &[_] = links;
            self.resolved = nodes
                .par_iter()
                .map(|node| resolve_node(node, links_ro))
                .collect::<FlowResult<Vec<_>>>()?;
        }

        // ── Apply ─────────────────────────────────────────────────────────
        //
        // Sequential, in node order.  Each link's upstream slot is written
        // exactly once (by its from-node) and each downstream slot exactly
        // once (by its to-node), so no value depends on this order.
        for flows in &self.resolved {
            for &(l, q) in &flows.downstream {
                links[l.index()].downstream_flow = q;
            }
            for &(l, q) in &flows.upstream {
                links[l.index()].upstream_flow = q;
            }
        }

        Ok(())
    }
}

/// Phase ③: advance every link's density by the continuity equation.
fn update_links(network: &mut Network, dt_hours: f64) {
    let (_, links) = network.nodes_and_links_mut();

    #[cfg(not(feature = "parallel"))]
    for link in links.iter_mut() {
        link.update_state(dt_hours);
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        links.par_iter_mut().for_each(|link| link.update_state(dt_hours));
    }
}

impl Default for FlowEngine {
    fn default() -> Self {
        Self::new()
    }
}
