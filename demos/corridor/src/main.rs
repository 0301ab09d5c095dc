//! corridor — smallest runnable demo for the rust_ctm workspace.
//!
//! Simulates a morning peak on a two-route corridor: a source feeds a split
//! junction, 70 % of traffic takes the direct arterial and 30 % a longer
//! bypass, and the routes merge again ahead of a sink.  Link-state snapshots
//! land in `output/corridor/` as CSV.

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ctm_core::SimConfig;
use ctm_output::{CsvWriter, SimOutputObserver};
use ctm_sim::Simulation;

use network::build_corridor;

// ── Constants ─────────────────────────────────────────────────────────────────

const INFLOW_VEH_H: f64 = 1400.0;
const START_HOURS: f64 = 6.0; // 06:00
const END_HOURS: f64 = 10.0; // 10:00
const STEP_HOURS: f64 = 0.01; // 36 s
const OUTPUT_INTERVAL_STEPS: u64 = 25; // every 15 simulated minutes

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== corridor — rust_ctm demo ===");
    println!("Inflow: {INFLOW_VEH_H} veh/h  |  Window: {START_HOURS}:00–{END_HOURS}:00");
    println!();

    // 1. Build the corridor.
    let (net, diagnostics, links) = build_corridor(INFLOW_VEH_H)?;
    println!("Network: {} nodes, {} links", net.node_count(), net.link_count());
    for d in &diagnostics {
        println!("note: {d}");
    }

    // 2. Sanity-check the step size against the kinematic bound.
    let bound = net.max_stable_step_hours().expect("network has links");
    println!(
        "Step: {STEP_HOURS} h (stability bound {bound:.4} h)"
    );
    assert!(STEP_HOURS <= bound, "step size violates the stability bound");
    println!();

    // 3. Sim config and driver.
    let config = SimConfig {
        start_hours: START_HOURS,
        end_hours: END_HOURS,
        step_hours: STEP_HOURS,
        output_interval_steps: OUTPUT_INTERVAL_STEPS,
    };
    let total_steps = config.total_steps();
    let initial_vehicles = net.total_vehicles();
    let mut sim = Simulation::new(config, net)?;

    // 4. CSV output.
    std::fs::create_dir_all("output/corridor")?;
    let writer = CsvWriter::new(Path::new("output/corridor"))?;
    let mut obs = SimOutputObserver::new(writer);

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!(
        "Simulated {total_steps} steps in {:.3} s (ends {})",
        elapsed.as_secs_f64(),
        sim.clock,
    );
    println!(
        "Vehicles on network: {:.1} → {:.1}",
        initial_vehicles,
        sim.network().total_vehicles()
    );
    println!();

    // 7. Final link states.
    println!(
        "{:<12} {:>12} {:>12} {:>10} {:>10}",
        "Link", "veh/km", "veh/h", "km/h", "veh"
    );
    println!("{}", "-".repeat(60));
    let named = [
        ("feeder", links.feeder),
        ("arterial", links.arterial),
        ("bypass_in", links.bypass_in),
        ("bypass_out", links.bypass_out),
        ("exit", links.exit),
    ];
    for (name, id) in named {
        let link = sim.network().link(id);
        println!(
            "{:<12} {:>12.2} {:>12.1} {:>10.1} {:>10.1}",
            name,
            link.density,
            link.flow()?,
            link.speed()?,
            link.vehicles(),
        );
    }

    Ok(())
}
