//! The `Simulation` struct and its run loop.

use ctm_core::{SimClock, SimConfig};
use ctm_flow::FlowEngine;
use ctm_network::Network;

use crate::error::{SimError, SimResult};
use crate::observer::StepObserver;

/// Owns a [`Network`] and advances it through simulated time.
///
/// `Simulation` is a pure driver: all physics lives in the engine and the
/// network; the only state added here is the clock.  Time advances
/// monotonically, one fixed-size step at a time.
pub struct Simulation {
    /// Global configuration (time window, step size, snapshot interval).
    pub config: SimConfig,

    /// Simulation clock — tracks the current step and maps it to hours.
    pub clock: SimClock,

    network: Network,
    engine: FlowEngine,
}

impl Simulation {
    /// Wrap `network` in a driver for the window described by `config`.
    ///
    /// Errors with [`SimError::Config`] if the config does not describe a
    /// runnable window.  The step size is *not* checked against the
    /// network's stability bound — compare against
    /// [`Network::max_stable_step_hours`] when choosing it.
    pub fn new(config: SimConfig, network: Network) -> SimResult<Self> {
        config.validate().map_err(|e| SimError::Config(e.to_string()))?;
        Ok(Self {
            clock: config.make_clock(),
            config,
            network,
            engine: FlowEngine::new(),
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable network access for drivers that vary demand between steps
    /// (densities, source inflows).  Structure must not be changed.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Current simulated time, in hours.
    pub fn time_hours(&self) -> f64 {
        self.clock.time_hours()
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the network by exactly one step of `config.step_hours`.
    pub fn step(&mut self) -> SimResult<()> {
        self.engine.step(&mut self.network, self.config.step_hours)?;
        self.clock.advance();
        Ok(())
    }

    /// Run from the current step to the end of the configured window,
    /// invoking observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let total = self.config.total_steps();
        while self.clock.current_step < total {
            self.run_one(observer)?;
        }
        observer.on_sim_end(self.clock.current_step, self.clock.time_hours());
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores the
    /// configured end).  Useful for tests and incremental stepping.
    pub fn run_steps<O: StepObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.run_one(observer)?;
        }
        Ok(())
    }

    fn run_one<O: StepObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let step = self.clock.current_step;
        observer.on_step_start(step, self.clock.time_hours());

        self.engine.step(&mut self.network, self.config.step_hours)?;
        self.clock.advance();

        let time = self.clock.time_hours();
        observer.on_step_end(step, time, &self.network);
        if self.config.output_interval_steps > 0
            && step.is_multiple_of(self.config.output_interval_steps)
        {
            observer.on_snapshot(step, time, &self.network);
        }
        Ok(())
    }
}
