//! Fluent builder for a [`MeshWsn`] and the [`SimEnv`] that drives it.

use wsn_core::{DeviceId, Position, SimConfig, SimRng, Timestamp};
use wsn_device::{DeviceBehavior, DeviceStoreBuilder, RadioConfig};
use wsn_sim::SimEnv;

use crate::{Medium, MediumConfig, MeshCounters, MeshError, MeshResult, MeshWsn};

/// Simulation-level RNG stream used for channel corruption draws.
const MEDIUM_STREAM: u64 = 1;

/// # Optional inputs (have defaults)
///
/// | Method                      | Default                  |
/// |-----------------------------|--------------------------|
/// | `.radio(r)`                 | `RadioConfig::default()` |
/// | `.medium(m)`                | `MediumConfig::default()`|
/// | `.derive_connections(b)`    | `true`                   |
///
/// # Example
///
/// ```rust,ignore
/// let (mut env, mut mesh) = MeshWsnBuilder::new(config)
///     .medium(MediumConfig { range_m: 50.0, ..Default::default() })
///     .populate(&positions, |_| ClusterMeshDev::new(ClusterConfig::default()))
///     .build()?;
/// env.run_until(mesh.config.end(), &mut mesh, &mut NoopObserver);
/// ```
pub struct MeshWsnBuilder {
    config:             SimConfig,
    medium:             MediumConfig,
    derive_connections: bool,
    devices:            DeviceStoreBuilder,
}

impl MeshWsnBuilder {
    pub fn new(config: SimConfig) -> Self {
        let devices = DeviceStoreBuilder::new(config.seed);
        Self {
            config,
            medium: MediumConfig::default(),
            derive_connections: true,
            devices,
        }
    }

    pub fn radio(mut self, radio: RadioConfig) -> Self {
        self.devices = self.devices.radio(radio);
        self
    }

    pub fn medium(mut self, medium: MediumConfig) -> Self {
        self.medium = medium;
        self
    }

    /// Turn off per-tick connection derivation when the topology will be
    /// supplied with [`MeshWsn::set_connections`].
    pub fn derive_connections(mut self, derive: bool) -> Self {
        self.derive_connections = derive;
        self
    }

    pub fn push<B: DeviceBehavior>(mut self, position: Position, behavior: B) -> Self {
        self.devices = self.devices.push(position, behavior);
        self
    }

    pub fn populate<B, F>(mut self, positions: &[Position], make: F) -> Self
    where
        B: DeviceBehavior,
        F: FnMut(DeviceId) -> B,
    {
        self.devices = self.devices.populate(positions, make);
        self
    }

    /// Validate, build the device arena, and attach every device to a fresh
    /// clock in ID order.
    pub fn build(self) -> MeshResult<(SimEnv<DeviceId>, MeshWsn)> {
        self.config.validate()?;
        validate_medium(&self.medium)?;

        let store = self.devices.build()?;
        let mut env = SimEnv::new();
        env.attach_all(store.ids())?;

        tracing::debug!(
            devices = store.count,
            range_m = self.medium.range_m,
            seed = self.config.seed,
            "mesh built"
        );

        let rng = SimRng::new(self.config.seed).fork(MEDIUM_STREAM);

        let mesh = MeshWsn {
            config: self.config,
            store,
            medium: Medium::new(self.medium),
            rng,
            derive_connections: self.derive_connections,
            connections: Vec::new(),
            counters: MeshCounters::default(),
            elapsed: Timestamp::ZERO,
        };
        Ok((env, mesh))
    }
}

fn validate_medium(m: &MediumConfig) -> MeshResult<()> {
    if !m.range_m.is_finite() || m.range_m <= 0.0 {
        return Err(MeshError::Config(format!("radio range {} m must be positive", m.range_m)));
    }
    let in_unit = |p: f64| (0.0..=1.0).contains(&p);
    if !in_unit(m.base_corruption) || !in_unit(m.edge_corruption) {
        return Err(MeshError::Config(format!(
            "corruption probabilities ({}, {}) must lie in [0, 1]",
            m.base_corruption, m.edge_corruption
        )));
    }
    Ok(())
}
