//! CSV device-layout loader.
//!
//! # CSV format
//!
//! One row per device; every ID in `0..n` must appear exactly once, in any
//! order.
//!
//! ```csv
//! device_id,x,y
//! 0,0.0,0.0
//! 1,12.5,3.0
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wsn_core::Position;

use crate::{DeviceError, DeviceResult};

#[derive(Deserialize)]
struct LayoutRecord {
    device_id: u32,
    x:         f64,
    y:         f64,
}

/// Load device positions from a CSV file, indexed by `DeviceId`.
pub fn load_layout_csv(path: &Path) -> DeviceResult<Vec<Position>> {
    let file = std::fs::File::open(path)?;
    load_layout_reader(file)
}

/// Like [`load_layout_csv`] but accepts any `Read` source.
pub fn load_layout_reader<R: Read>(reader: R) -> DeviceResult<Vec<Position>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: BTreeMap<u32, Position> = BTreeMap::new();

    for result in csv_reader.deserialize::<LayoutRecord>() {
        let row = result.map_err(|e| DeviceError::Parse(e.to_string()))?;
        let position = Position::new(row.x, row.y);
        if !position.is_finite() {
            return Err(DeviceError::Parse(format!(
                "device {} has a non-finite coordinate",
                row.device_id
            )));
        }
        if rows.insert(row.device_id, position).is_some() {
            return Err(DeviceError::Parse(format!("device {} listed twice", row.device_id)));
        }
    }

    // Keys are sorted and unique, so `0..n` holds iff the i-th key is i.
    let mut positions = Vec::with_capacity(rows.len());
    for (i, (id, position)) in rows.into_iter().enumerate() {
        if id as usize != i {
            return Err(DeviceError::Parse(format!("device {i} missing from layout")));
        }
        positions.push(position);
    }

    tracing::debug!(devices = positions.len(), "loaded device layout");
    Ok(positions)
}
