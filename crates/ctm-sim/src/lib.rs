//! `ctm-sim` — run-loop orchestrator for the `rust_ctm` workspace.
//!
//! # Crate layout
//!
//! | Module       | Contents                                    |
//! |--------------|---------------------------------------------|
//! | [`sim`]      | `Simulation` — config, clock, and run loop  |
//! | [`observer`] | `StepObserver` trait, `NoopObserver`        |
//! | [`error`]    | `SimError`, `SimResult<T>`                  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ctm_core::SimConfig;
//! use ctm_sim::{NoopObserver, Simulation};
//!
//! let (network, diagnostics) = builder.build()?;
//! let config = SimConfig {
//!     start_hours: 0.0,
//!     end_hours: 24.0,
//!     step_hours: 0.01,
//!     output_interval_steps: 25,
//! };
//! let mut sim = Simulation::new(config, network)?;
//! sim.run(&mut NoopObserver)?;
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `parallel` | Enables the engine's Rayon-parallel step phases.      |

pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, StepObserver};
pub use sim::Simulation;
