//! `wsn-output`: simulation output for the `wsn_sim` simulator.
//!
//! | Backend | Files created                                |
//! |---------|----------------------------------------------|
//! | CSV     | `tick_summaries.csv`, `device_reports.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by [`StatsObserver`],
//! which implements `wsn_sim::SimObserver<MeshWsn>`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wsn_output::{CsvWriter, StatsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = StatsObserver::new(writer, &mesh.config);
//! env.run_until(mesh.config.end(), &mut mesh, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     tracing::error!(error = %e, "output failed");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsObserver;
pub use row::{DeviceReportRow, TickSummaryRow};
pub use writer::OutputWriter;
