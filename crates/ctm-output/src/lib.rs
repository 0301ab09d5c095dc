//! `ctm-output` — simulation output writers for the `rust_ctm` workspace.
//!
//! The workspace core performs no I/O and no logging of its own; this crate
//! is the read-only boundary consumer that records per-step link state
//! (density, flow, speed) the same way a renderer would read it.
//!
//! | Module       | Contents                                           |
//! |--------------|----------------------------------------------------|
//! | [`row`]      | `LinkSnapshotRow`, `StepSummaryRow`                |
//! | [`writer`]   | `OutputWriter` trait                               |
//! | [`csv`]      | `CsvWriter` — two-file CSV backend                 |
//! | [`observer`] | `SimOutputObserver<W>` — `StepObserver` bridge     |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ctm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{LinkSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;
