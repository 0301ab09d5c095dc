//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing step counter.  The
//! mapping to simulated hours is held in `SimClock`:
//!
//!   time_hours = start_hours + current_step * step_hours
//!
//! Deriving the time from an integer counter (rather than accumulating
//! `time += dt` in floating point) keeps step comparisons exact and the
//! clock free of drift over long runs.

use std::fmt;

use crate::error::{CoreResult, DomainError};

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks elapsed simulated time as a step counter plus a fixed step size.
///
/// Cheap to copy; holds no heap data.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated time of step 0, in hours.
    pub start_hours: f64,
    /// Simulated duration of one step, in hours.
    pub step_hours: f64,
    /// The current step — advanced by [`advance`](Self::advance) once per step.
    pub current_step: u64,
}

impl SimClock {
    pub fn new(start_hours: f64, step_hours: f64) -> Self {
        Self { start_hours, step_hours, current_step: 0 }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step += 1;
    }

    /// Current simulated time, in hours.
    #[inline]
    pub fn time_hours(&self) -> f64 {
        self.start_hours + self.current_step as f64 * self.step_hours
    }

    /// Simulated hours elapsed since step 0.
    #[inline]
    pub fn elapsed_hours(&self) -> f64 {
        self.current_step as f64 * self.step_hours
    }

    /// Break the current time into (hours, minutes, seconds) components.
    /// Useful for human-readable reporting without a datetime library.
    pub fn hms(&self) -> (u64, u32, u32) {
        let total_secs = (self.time_hours().max(0.0) * 3600.0).round() as u64;
        let h = total_secs / 3600;
        let m = ((total_secs % 3600) / 60) as u32;
        let s = (total_secs % 60) as u32;
        (h, m, s)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.hms();
        write!(f, "step {} ({:02}:{:02}:{:02})", self.current_step, h, m, s)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate and passed
/// to the simulation driver.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated time of the first step, in hours (e.g. 0.0 = midnight).
    pub start_hours: f64,

    /// Simulated time at which the run ends, in hours.
    pub end_hours: f64,

    /// Step size in hours.  Must respect the network's kinematic stability
    /// bound (`length / max(free_flow_speed, congestion_wave_speed)` over
    /// all links) for physically valid results; the update law itself does
    /// not enforce this.
    pub step_hours: f64,

    /// Invoke the snapshot observer hook every N steps.  0 disables
    /// snapshots entirely.
    pub output_interval_steps: u64,
}

impl SimConfig {
    /// Number of steps needed to cover `[start_hours, end_hours]`.
    pub fn total_steps(&self) -> u64 {
        ((self.end_hours - self.start_hours) / self.step_hours).ceil().max(0.0) as u64
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_hours, self.step_hours)
    }

    /// Check that the configured times describe a runnable window.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.step_hours.is_finite() && self.step_hours > 0.0) {
            return Err(DomainError::InvalidParameter {
                name: "step_hours",
                value: self.step_hours,
            });
        }
        if !self.start_hours.is_finite() || !self.end_hours.is_finite()
            || self.end_hours < self.start_hours
        {
            return Err(DomainError::InvalidParameter {
                name: "end_hours",
                value: self.end_hours,
            });
        }
        Ok(())
    }
}
