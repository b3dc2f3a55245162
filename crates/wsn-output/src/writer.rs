//! The `OutputWriter` trait implemented by backend writers.

use crate::{DeviceReportRow, OutputResult, TickSummaryRow};

/// A sink for simulation output.
///
/// Errors never interrupt a run: the observer stores them for
/// [`StatsObserver::take_error`][crate::StatsObserver::take_error].
pub trait OutputWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_device_reports(&mut self, rows: &[DeviceReportRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
