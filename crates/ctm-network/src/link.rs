//! Directed road segment.

use ctm_core::{CoreResult, FundamentalDiagram, LinkId, NodeId};

/// A directed link between two nodes.
///
/// The only persistent state is `density`; the two flow slots are transient
/// values overwritten on every simulation step by the resolution pass at the
/// link's endpoint nodes.  Each slot has exactly one writer: `upstream_flow`
/// is written only when the *from*-node resolves, `downstream_flow` only when
/// the *to*-node resolves.  Keeping the slots separate is what makes per-node
/// resolution free of write conflicts.
///
/// Length and fundamental diagram are fixed at build time; do not construct
/// directly, use [`NetworkBuilder`][crate::NetworkBuilder].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub id: LinkId,
    pub from: NodeId,
    pub to: NodeId,

    /// Geometric length, km.  Derived from the endpoint positions.
    length_km: f64,

    /// The link's flow model.
    fd: FundamentalDiagram,

    /// Vehicle density, veh/km.  Stays in `[0, jam_density]` whenever the
    /// step size respects the kinematic stability bound; the update law does
    /// not clamp.
    pub density: f64,

    /// Flow entering at the upstream end, veh/h.  Transient; meaningless
    /// before the first resolution pass.
    pub upstream_flow: f64,

    /// Flow leaving at the downstream end, veh/h.  Transient.
    pub downstream_flow: f64,
}

impl Link {
    pub(crate) fn new(
        id: LinkId,
        from: NodeId,
        to: NodeId,
        length_km: f64,
        fd: FundamentalDiagram,
        density: f64,
    ) -> Self {
        Self {
            id,
            from,
            to,
            length_km,
            fd,
            density,
            upstream_flow: 0.0,
            downstream_flow: 0.0,
        }
    }

    /// Geometric length, km.
    #[inline]
    pub fn length_km(&self) -> f64 {
        self.length_km
    }

    /// The link's fundamental diagram.
    #[inline]
    pub fn fd(&self) -> &FundamentalDiagram {
        &self.fd
    }

    // ── Capacity queries used by junction resolution ──────────────────────

    /// Sending capacity at the current density (demand), veh/h.
    #[inline]
    pub fn demand(&self) -> f64 {
        self.fd.sending_capacity(self.density)
    }

    /// Receiving capacity at the current density (supply), veh/h.
    #[inline]
    pub fn supply(&self) -> f64 {
        self.fd.receiving_capacity(self.density)
    }

    // ── Derived state for the read-only boundary ──────────────────────────

    /// Flow at the current density per the fundamental diagram, veh/h.
    pub fn flow(&self) -> CoreResult<f64> {
        self.fd.flow_at_density(self.density)
    }

    /// Speed at the current density per the fundamental diagram, km/h.
    pub fn speed(&self) -> CoreResult<f64> {
        self.fd.speed_at_density(self.density)
    }

    /// Vehicles currently on the link (density × length).
    #[inline]
    pub fn vehicles(&self) -> f64 {
        self.density * self.length_km
    }

    // ── State update ──────────────────────────────────────────────────────

    /// Advance the density by one step of the discretized continuity
    /// equation:
    ///
    ///   density ← density + (dt / length) × (upstream_flow − downstream_flow)
    ///
    /// `dt_hours` must satisfy the stability bound
    /// `dt ≤ length / max(free_flow_speed, congestion_wave_speed)` for the
    /// density to stay within `[0, jam_density]`; this is the caller's
    /// responsibility (see [`Network::max_stable_step_hours`][crate::Network::max_stable_step_hours]).
    #[inline]
    pub fn update_state(&mut self, dt_hours: f64) {
        self.density += (dt_hours / self.length_km) * (self.upstream_flow - self.downstream_flow);
    }
}
