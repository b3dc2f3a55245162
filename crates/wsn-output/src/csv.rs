//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `tick_summaries.csv`
//! - `device_reports.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DeviceReportRow, OutputResult, TickSummaryRow};

pub struct CsvWriter {
    summaries: Writer<File>,
    reports:   Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the output directory if needed, open both files, and write
    /// their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "transmits", "receives", "corrupted", "connections"])?;

        let mut reports = Writer::from_path(dir.join("device_reports.csv"))?;
        reports.write_record([
            "device_id",
            "x",
            "y",
            "is_head",
            "neighbors",
            "duty_cycle",
            "consumed_mah",
        ])?;

        Ok(Self { summaries, reports, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.transmits.to_string(),
            row.receives.to_string(),
            row.corrupted.to_string(),
            row.connections.to_string(),
        ])?;
        Ok(())
    }

    fn write_device_reports(&mut self, rows: &[DeviceReportRow]) -> OutputResult<()> {
        for row in rows {
            self.reports.write_record(&[
                row.device_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                (row.is_head as u8).to_string(),
                row.neighbors.to_string(),
                format!("{:.6}", row.duty_cycle),
                format!("{:.6}", row.consumed_mah),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.reports.flush()?;
        Ok(())
    }
}
