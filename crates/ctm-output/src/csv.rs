//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `link_snapshots.csv` — one row per link per snapshot step
//! - `step_summaries.csv` — one row per step

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{LinkSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("link_snapshots.csv"))?;
        snapshots.write_record([
            "step",
            "time_hours",
            "link_id",
            "density_veh_km",
            "flow_veh_h",
            "speed_km_h",
            "vehicles",
        ])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(["step", "time_hours", "total_vehicles"])?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[LinkSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.step.to_string(),
                row.time_hours.to_string(),
                row.link_id.to_string(),
                row.density.to_string(),
                row.flow.to_string(),
                row.speed.to_string(),
                row.vehicles.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.time_hours.to_string(),
            row.total_vehicles.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
