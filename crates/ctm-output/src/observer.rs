//! `SimOutputObserver<W>` — bridges `StepObserver` to an `OutputWriter`.

use ctm_network::Network;
use ctm_sim::StepObserver;

use crate::row::{LinkSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`StepObserver`] that records step summaries and link-state snapshots
/// through any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// Collect one snapshot row per link.
///
/// Fails if any density has left its diagram's valid range (an unstable
/// step size) — derived flow and speed are undefined there.
fn snapshot_rows(step: u64, time_hours: f64, network: &Network) -> OutputResult<Vec<LinkSnapshotRow>> {
    network
        .links()
        .iter()
        .map(|link| {
            Ok(LinkSnapshotRow {
                step,
                time_hours,
                link_id: link.id.0,
                density: link.density,
                flow: link.flow()?,
                speed: link.speed()?,
                vehicles: link.vehicles(),
            })
        })
        .collect()
}

impl<W: OutputWriter> StepObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, step: u64, time_hours: f64, network: &Network) {
        let row = StepSummaryRow {
            step,
            time_hours,
            total_vehicles: network.total_vehicles(),
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: u64, time_hours: f64, network: &Network) {
        let result = snapshot_rows(step, time_hours, network)
            .and_then(|rows| self.writer.write_snapshots(&rows));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: u64, _time_hours: f64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
