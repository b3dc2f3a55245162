//! cluster: a small clustered sensor field.
//!
//! Scatters devices over a square field (or loads a layout CSV given as the
//! first argument), runs the neighbor-count clustering protocol for ten
//! simulated minutes, writes CSV output to `./output`, and prints the
//! network statistics.
//!
//! ```text
//! RUST_LOG=wsn_mesh=debug cargo run -p cluster -- layout.csv
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wsn_core::{BatteryProfile, Position, SimConfig, SimRng};
use wsn_device::load_layout_csv;
use wsn_mesh::{ClusterConfig, ClusterMeshDev, MediumConfig, MeshWsnBuilder};
use wsn_output::{CsvWriter, StatsObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEVICE_COUNT:          usize = 60;
const FIELD_SIDE_M:          f64   = 120.0;
const SEED:                  u64   = 42;
const TICKS_PER_HOUR:        u64   = 3_600_000; // 1 tick = 1 ms
const SIM_MINUTES:           u64   = 10;
const STABILIZATION_TICKS:   u64   = 60_000;    // first simulated minute
const OUTPUT_INTERVAL_TICKS: u64   = 10_000;

fn scatter(count: usize, side: f64, seed: u64) -> Vec<Position> {
    let mut rng = SimRng::new(seed);
    (0..count)
        .map(|_| Position::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let positions = match std::env::args().nth(1) {
        Some(path) => load_layout_csv(Path::new(&path))?,
        None => scatter(DEVICE_COUNT, FIELD_SIDE_M, SEED),
    };
    if positions.is_empty() {
        bail!("layout contains no devices");
    }

    let config = SimConfig {
        total_ticks:           SIM_MINUTES * TICKS_PER_HOUR / 60,
        seed:                  SEED,
        ticks_per_hour:        TICKS_PER_HOUR,
        stabilization_ticks:   STABILIZATION_TICKS,
        battery:               BatteryProfile::TWO_E91_AA,
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
        ..SimConfig::default()
    };
    let cluster = ClusterConfig::default();

    let (mut env, mut mesh) = MeshWsnBuilder::new(config.clone())
        .medium(MediumConfig { range_m: 30.0, ..MediumConfig::default() })
        .populate(&positions, |_| ClusterMeshDev::new(cluster))
        .build()?;
    info!(devices = mesh.device_count(), ticks = config.total_ticks, "starting run");

    let writer = CsvWriter::new(Path::new("./output"))?;
    let mut observer = StatsObserver::new(writer, &config);

    let started = Instant::now();
    env.run_until(config.end(), &mut mesh, &mut observer);
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "run finished");

    if let Some(e) = observer.take_error() {
        return Err(e.into());
    }

    let stats = mesh.statistics();
    info!(
        transmits = stats.transmits,
        receives = stats.receives,
        corrupted = stats.corrupted,
        cluster_heads = stats.cluster_heads.len(),
        loners = stats.loners,
        useless_heads = stats.useless_heads,
        rx_per_tx = ?stats.rx_per_tx,
        symmetric_rate = ?stats.symmetric_rate,
        "network statistics"
    );
    if let Some(power) = &stats.power {
        info!(
            avg_mah = power.avg_usage_mah,
            max_ma = power.max_current_ma,
            min_ma = power.min_current_ma,
            first_death_h = power.first_death.map(|l| l.total_hours),
            last_death_h = power.last_death.map(|l| l.total_hours),
            "power"
        );
    }

    println!("{stats}");
    Ok(())
}
