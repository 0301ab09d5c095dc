//! Triangular fundamental diagram.
//!
//! # Model
//!
//! The fundamental diagram maps a link's vehicle density to flow and speed.
//! It is parameterized by three physical constants and is triangular:
//!
//! ```text
//! flow (veh/h)
//!   │        ╱╲
//!   │       ╱  ╲___ slope −congestion_wave_speed
//!   │      ╱       ╲
//!   │     ╱ slope    ╲
//!   │    ╱  free_flow  ╲
//!   └───┴──────┴────────┴──── density (veh/km)
//!       0   critical   jam
//! ```
//!
//! Below the critical density traffic moves at the free-flow speed and flow
//! grows linearly; at or above it the link is congested and flow falls off
//! at the congestion wave speed until it reaches zero at the jam density.
//! The two branches meet at the critical density, where flow equals the
//! flow capacity.

use crate::error::{CoreResult, DomainError};

/// Density→(flow, speed) relationship for a homogeneous road segment.
///
/// Immutable after construction; [`new`](Self::new) validates that all three
/// parameters are positive and finite.  Small enough to store by value on
/// every link (three `f64`s).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FundamentalDiagram {
    flow_capacity: f64,
    critical_density: f64,
    congestion_wave_speed: f64,
}

impl FundamentalDiagram {
    /// Build a diagram from its three physical constants.
    ///
    /// - `flow_capacity`: maximum flow, veh/h.
    /// - `critical_density`: density at which capacity is reached, veh/km.
    /// - `congestion_wave_speed`: speed of the backward wave in the congested
    ///   regime, km/h.
    ///
    /// Errors with [`DomainError::InvalidParameter`] if any constant is not
    /// positive and finite.
    pub fn new(
        flow_capacity: f64,
        critical_density: f64,
        congestion_wave_speed: f64,
    ) -> CoreResult<Self> {
        for (name, value) in [
            ("flow_capacity", flow_capacity),
            ("critical_density", critical_density),
            ("congestion_wave_speed", congestion_wave_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DomainError::InvalidParameter { name, value });
            }
        }
        Ok(Self { flow_capacity, critical_density, congestion_wave_speed })
    }

    // ── Parameters ────────────────────────────────────────────────────────

    /// Maximum flow, veh/h.
    #[inline]
    pub fn flow_capacity(&self) -> f64 {
        self.flow_capacity
    }

    /// Density at which flow capacity is reached, veh/km.
    #[inline]
    pub fn critical_density(&self) -> f64 {
        self.critical_density
    }

    /// Backward-wave speed in the congested regime, km/h.
    #[inline]
    pub fn congestion_wave_speed(&self) -> f64 {
        self.congestion_wave_speed
    }

    // ── Derived quantities ────────────────────────────────────────────────

    /// Vehicle speed in the free-flow regime, km/h.
    #[inline]
    pub fn free_flow_speed(&self) -> f64 {
        self.flow_capacity / self.critical_density
    }

    /// Density at which flow reaches zero, veh/km.
    #[inline]
    pub fn jam_density(&self) -> f64 {
        self.flow_capacity / self.congestion_wave_speed + self.critical_density
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Flow at `density`, veh/h.
    ///
    /// Free-flow branch below the critical density, congested branch at or
    /// above it; the two meet at the critical density.  Errors with
    /// [`DomainError::Density`] outside `[0, jam_density]`.
    pub fn flow_at_density(&self, density: f64) -> CoreResult<f64> {
        self.check_density(density)?;
        if density < self.critical_density {
            Ok(self.free_flow_speed() * density)
        } else {
            Ok(self.flow_capacity - self.congestion_wave_speed * (density - self.critical_density))
        }
    }

    /// Speed at `density`, km/h.
    ///
    /// Returns the free-flow speed below the critical density.  At or above
    /// it, returns the congestion wave speed — the speed of the *backward
    /// wave*, not of vehicles; this is the model's convention for the
    /// congested regime.
    pub fn speed_at_density(&self, density: f64) -> CoreResult<f64> {
        self.check_density(density)?;
        if density < self.critical_density {
            Ok(self.free_flow_speed())
        } else {
            Ok(self.congestion_wave_speed)
        }
    }

    /// Sending capacity (demand): the maximum flow a link at `density` can
    /// send downstream.  Zero at zero density, otherwise the free-flow flow
    /// capped by the flow capacity.
    ///
    /// Total for any `density >= 0`; the junction solver relies on this
    /// never dividing by density.
    #[inline]
    pub fn sending_capacity(&self, density: f64) -> f64 {
        (self.free_flow_speed() * density).min(self.flow_capacity)
    }

    /// Receiving capacity (supply): the maximum flow a link at `density` can
    /// accept, limited by the headroom to the jam density.
    #[inline]
    pub fn receiving_capacity(&self, density: f64) -> f64 {
        (self.congestion_wave_speed * (self.jam_density() - density)).min(self.flow_capacity)
    }

    fn check_density(&self, density: f64) -> CoreResult<()> {
        if density < 0.0 || density > self.jam_density() || density.is_nan() {
            return Err(DomainError::Density { density, jam_density: self.jam_density() });
        }
        Ok(())
    }
}

impl Default for FundamentalDiagram {
    /// A typical urban arterial: 1800 veh/h capacity, critical density
    /// 33.7 veh/km (≈53 km/h free-flow speed), 6.9 km/h congestion wave.
    fn default() -> Self {
        Self {
            flow_capacity: 1800.0,
            critical_density: 33.7,
            congestion_wave_speed: 6.9,
        }
    }
}
