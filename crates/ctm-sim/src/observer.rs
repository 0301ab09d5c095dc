//! Simulation observer trait for progress reporting and data collection.

use ctm_network::Network;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the run loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Hooks receive the network read-only:
/// observers (renderers, output writers, probes) consume state and feed
/// nothing back into the solver.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl StepObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: u64, time_hours: f64, network: &Network) {
///         if step % self.interval == 0 {
///             println!("t={time_hours:.2} h: {:.1} veh", network.total_vehicles());
///         }
///     }
/// }
/// ```
pub trait StepObserver {
    /// Called at the very start of each step, before any flow resolution.
    /// `time_hours` is the simulated time of the state about to be advanced.
    fn on_step_start(&mut self, _step: u64, _time_hours: f64) {}

    /// Called after the step completes.  `time_hours` is the simulated time
    /// of the post-step state.
    fn on_step_end(&mut self, _step: u64, _time_hours: f64, _network: &Network) {}

    /// Called at snapshot intervals (every `config.output_interval_steps`
    /// steps) with the post-step state, so output writers can record link
    /// densities, flows, and speeds without the driver knowing about any
    /// specific format.
    fn on_snapshot(&mut self, _step: u64, _time_hours: f64, _network: &Network) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_step: u64, _time_hours: f64) {}
}

/// A [`StepObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
