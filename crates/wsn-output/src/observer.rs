//! `StatsObserver<W>`: bridges `SimObserver<MeshWsn>` to an `OutputWriter`.

use wsn_core::{SimConfig, Timestamp};
use wsn_mesh::MeshWsn;
use wsn_sim::SimObserver;

use crate::row::{DeviceReportRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// Writes a [`TickSummaryRow`] every `output_interval_ticks` and one
/// [`DeviceReportRow`] per device when the run ends.
///
/// Errors from the writer are stored because `SimObserver` methods have no
/// return value; retrieve the first one with [`take_error`](Self::take_error).
pub struct StatsObserver<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StatsObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            interval:   config.output_interval_ticks,
            last_error: None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

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

fn device_reports(mesh: &MeshWsn) -> Vec<DeviceReportRow> {
    let end = mesh.elapsed();
    let first = Timestamp(mesh.config.stabilization_ticks).min(end);
    let tph = mesh.config.ticks_per_hour;

    mesh.store
        .ids()
        .filter_map(|id| {
            let device = mesh.store.device(id)?;
            let behavior = mesh.store.behavior(id)?;
            Some(DeviceReportRow {
                device_id:    id.0,
                x:            device.position.x,
                y:            device.position.y,
                is_head:      behavior.is_cluster_head(),
                neighbors:    behavior.neighbors().len() as u32,
                duty_cycle:   device.radio().total_duty_cycle(end),
                consumed_mah: device.power_usage_avg(first, end, tph),
            })
        })
        .collect()
}

impl<W: OutputWriter> SimObserver<MeshWsn> for StatsObserver<W> {
    fn on_tick_end(&mut self, now: Timestamp, mesh: &MeshWsn) {
        if self.interval == 0 || now.0 % self.interval != 0 {
            return;
        }
        let counters = mesh.counters();
        let row = TickSummaryRow {
            tick:        now.0,
            transmits:   counters.transmits,
            receives:    counters.receives,
            corrupted:   counters.corrupted,
            connections: mesh.connections().len() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final: Timestamp, mesh: &MeshWsn) {
        let rows = device_reports(mesh);
        let result = self.writer.write_device_reports(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
