//! The backend-agnostic writer trait.

use crate::row::{LinkSnapshotRow, StepSummaryRow};
use crate::OutputResult;

/// A sink for simulation output rows.
///
/// Implementations buffer or stream as they see fit; [`finish`](Self::finish)
/// must flush everything and is idempotent.
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[LinkSnapshotRow]) -> OutputResult<()>;

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    fn finish(&mut self) -> OutputResult<()>;
}
