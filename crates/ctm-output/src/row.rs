//! Plain data row types written by output backends.

/// One link's state at a snapshot step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSnapshotRow {
    pub step: u64,
    /// Simulated time of the post-step state, hours.
    pub time_hours: f64,
    pub link_id: u32,
    /// Vehicle density, veh/km.
    pub density: f64,
    /// Flow per the fundamental diagram at this density, veh/h.
    pub flow: f64,
    /// Speed per the fundamental diagram at this density, km/h.
    pub speed: f64,
    /// Vehicles on the link (density × length).
    pub vehicles: f64,
}

/// Network-wide summary for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step: u64,
    pub time_hours: f64,
    /// Total vehicles on the network.
    pub total_vehicles: f64,
}
