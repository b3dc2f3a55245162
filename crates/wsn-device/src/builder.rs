//! Fluent builder for a [`DeviceStore`].
//!
//! ```rust
//! use wsn_core::Position;
//! use wsn_device::{DeviceStoreBuilder, PassiveBehavior};
//!
//! let store = DeviceStoreBuilder::new(/*seed=*/ 42)
//!     .populate(&[Position::new(0.0, 0.0), Position::new(5.0, 0.0)], |_| PassiveBehavior)
//!     .build()
//!     .unwrap();
//! assert_eq!(store.count, 2);
//! ```

use wsn_core::{DeviceId, DeviceRng, Position, Timestamp};

use crate::{Device, DeviceBehavior, DeviceError, DeviceResult, DeviceStore, RadioConfig};

pub struct DeviceStoreBuilder {
    seed:    u64,
    radio:   RadioConfig,
    start:   Timestamp,
    entries: Vec<(Position, Box<dyn DeviceBehavior>)>,
}

impl DeviceStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            radio: RadioConfig::default(),
            start: Timestamp::ZERO,
            entries: Vec::new(),
        }
    }

    /// Radio current figures shared by every device.
    pub fn radio(mut self, radio: RadioConfig) -> Self {
        self.radio = radio;
        self
    }

    /// Timestamp the devices are created at (duty cycles count from here).
    pub fn start(mut self, start: Timestamp) -> Self {
        self.start = start;
        self
    }

    /// Append one device.  IDs are assigned in push order.
    pub fn push<B: DeviceBehavior>(mut self, position: Position, behavior: B) -> Self {
        self.entries.push((position, Box::new(behavior)));
        self
    }

    /// Append one device per position, building each behavior from its ID.
    pub fn populate<B, F>(mut self, positions: &[Position], mut make: F) -> Self
    where
        B: DeviceBehavior,
        F: FnMut(DeviceId) -> B,
    {
        for &position in positions {
            let id = DeviceId(self.entries.len() as u32);
            self.entries.push((position, Box::new(make(id))));
        }
        self
    }

    /// Construct the arena.  A population must contain at least one device.
    pub fn build(self) -> DeviceResult<DeviceStore> {
        if self.entries.is_empty() {
            return Err(DeviceError::NoDevices);
        }
        let count = self.entries.len();
        let mut devices = Vec::with_capacity(count);
        let mut behaviors = Vec::with_capacity(count);
        let mut rngs = Vec::with_capacity(count);

        for (i, (position, behavior)) in self.entries.into_iter().enumerate() {
            let id = DeviceId(i as u32);
            devices.push(Device::new(id, position, self.radio, self.start));
            behaviors.push(behavior);
            rngs.push(DeviceRng::new(self.seed, id));
        }

        Ok(DeviceStore { count, devices, behaviors, rngs })
    }
}
