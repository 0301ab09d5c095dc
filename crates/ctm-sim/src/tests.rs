//! Integration tests for ctm-sim.

use ctm_core::{FundamentalDiagram, LinkId, Point, SimConfig};
use ctm_network::{Network, NetworkBuilder};

use crate::{NoopObserver, SimError, Simulation, StepObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn arterial() -> FundamentalDiagram {
    FundamentalDiagram::new(1800.0, 33.7, 6.9).unwrap()
}

/// source(900 veh/h) → 2 km link → sink, initially carrying 10 veh/km.
fn pipe() -> Network {
    let mut b = NetworkBuilder::new();
    let src = b.add_source(Point::new(0.0, 0.0), 900.0);
    let sink = b.add_sink(Point::new(2.0, 0.0));
    b.add_link(src, sink, arterial(), 10.0).unwrap();
    b.build().unwrap().0
}

fn config(total_hours: f64) -> SimConfig {
    SimConfig {
        start_hours: 0.0,
        end_hours: total_hours,
        step_hours: 0.01,
        output_interval_steps: 4,
    }
}

#[derive(Default)]
struct CountingObserver {
    starts: usize,
    ends: usize,
    snapshots: usize,
    sim_ended: bool,
    last_time: f64,
}

impl StepObserver for CountingObserver {
    fn on_step_start(&mut self, _step: u64, _time_hours: f64) {
        self.starts += 1;
    }
    fn on_step_end(&mut self, _step: u64, time_hours: f64, _network: &Network) {
        self.ends += 1;
        self.last_time = time_hours;
    }
    fn on_snapshot(&mut self, _step: u64, _time_hours: f64, _network: &Network) {
        self.snapshots += 1;
    }
    fn on_sim_end(&mut self, _final_step: u64, _time_hours: f64) {
        self.sim_ended = true;
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn valid_config_builds() {
        let sim = Simulation::new(config(1.0), pipe()).unwrap();
        assert_eq!(sim.time_hours(), 0.0);
        assert_eq!(sim.network().link_count(), 1);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let bad = SimConfig { step_hours: 0.0, ..config(1.0) };
        assert!(matches!(Simulation::new(bad, pipe()), Err(SimError::Config(_))));
    }

    #[test]
    fn backwards_window_is_rejected() {
        let bad = SimConfig { end_hours: -1.0, ..config(1.0) };
        assert!(Simulation::new(bad, pipe()).is_err());
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;

    #[test]
    fn runs_every_step_of_the_window() {
        let mut sim = Simulation::new(config(1.0), pipe()).unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.starts, 100);
        assert_eq!(obs.ends, 100);
        assert!(obs.sim_ended);
        assert!((sim.time_hours() - 1.0).abs() < 1e-9);
        assert!((obs.last_time - 1.0).abs() < 1e-9);
    }

    #[test]
    fn snapshots_follow_the_configured_interval() {
        let mut sim = Simulation::new(config(0.1), pipe()).unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        // Steps 0..10 with interval 4 → snapshots at 0, 4, 8.
        assert_eq!(obs.snapshots, 3);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let cfg = SimConfig { output_interval_steps: 0, ..config(0.1) };
        let mut sim = Simulation::new(cfg, pipe()).unwrap();
        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.snapshots, 0);
    }

    #[test]
    fn single_step_advances_state_and_clock() {
        let mut sim = Simulation::new(config(1.0), pipe()).unwrap();
        let before = sim.network().link(LinkId(0)).density;
        sim.step().unwrap();

        // Inflow 900 > outflow (sending capacity of 10 veh/km ≈ 534 veh/h),
        // so the link fills up.
        assert!(sim.network().link(LinkId(0)).density > before);
        assert_eq!(sim.clock.current_step, 1);
        assert!((sim.time_hours() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn run_steps_ignores_the_window_end() {
        let mut sim = Simulation::new(config(0.05), pipe()).unwrap();
        let mut obs = CountingObserver::default();
        sim.run_steps(12, &mut obs).unwrap();
        assert_eq!(obs.ends, 12);
        assert!(!obs.sim_ended);
    }

    #[test]
    fn run_propagates_resolution_failures() {
        let mut sim = Simulation::new(config(1.0), pipe()).unwrap();
        // Corrupt the structure behind the builder's back: the first failed
        // resolution must abort the run.
        let sink = sim.network().link(LinkId(0)).to;
        sim.network_mut().node_mut(sink).outgoing.push(LinkId(0));
        assert!(matches!(sim.run(&mut NoopObserver), Err(SimError::Flow(_))));
    }

    #[test]
    fn demand_fills_the_pipe_toward_equilibrium() {
        // With inflow 900 veh/h the pipe's density should approach the
        // free-flow density carrying 900 veh/h (900 / v ≈ 16.85 veh/km).
        let mut sim = Simulation::new(config(2.0), pipe()).unwrap();
        sim.run(&mut NoopObserver).unwrap();
        let rho = sim.network().link(LinkId(0)).density;
        assert!((rho - 900.0 * 33.7 / 1800.0).abs() < 0.5, "got {rho}");
    }
}
