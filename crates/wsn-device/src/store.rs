//! `DeviceStore`: the device arena.
//!
//! # Layout
//!
//! Three parallel `Vec`s indexed by `DeviceId`: the devices themselves, their
//! behaviors, and their RNGs.  Keeping them apart lets a caller hold
//! `&Device` while invoking `&mut dyn DeviceBehavior` with `&mut DeviceRng`
//! for the same slot, which a single struct-per-device would forbid.

use wsn_core::{DeviceId, DeviceRng, Timestamp};

use crate::{Device, DeviceBehavior, DeviceContext, Intent};

pub struct DeviceStore {
    /// Number of devices.  Equals the length of every `Vec`.
    pub count:     usize,
    pub devices:   Vec<Device>,
    pub behaviors: Vec<Box<dyn DeviceBehavior>>,
    pub rngs:      Vec<DeviceRng>,
}

impl DeviceStore {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Every `DeviceId` in ascending index order.
    pub fn ids(&self) -> impl Iterator<Item = DeviceId> + '_ {
        (0..self.count as u32).map(DeviceId)
    }

    #[inline]
    pub fn contains(&self, id: DeviceId) -> bool {
        id.index() < self.count
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(id.index())
    }

    pub fn device_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
        self.devices.get_mut(id.index())
    }

    pub fn behavior(&self, id: DeviceId) -> Option<&dyn DeviceBehavior> {
        self.behaviors.get(id.index()).map(|b| b.as_ref())
    }

    /// Invoke one behavior callback for `id` with its context and RNG.
    ///
    /// Returns no intents for an unknown ID.
    pub fn invoke<F>(&mut self, id: DeviceId, now: Timestamp, f: F) -> Vec<Intent>
    where
        F: FnOnce(&mut dyn DeviceBehavior, &DeviceContext<'_>, &mut DeviceRng) -> Vec<Intent>,
    {
        let i = id.index();
        let (Some(device), Some(behavior), Some(rng)) =
            (self.devices.get(i), self.behaviors.get_mut(i), self.rngs.get_mut(i))
        else {
            return vec![];
        };
        let ctx = DeviceContext::new(now, device);
        f(behavior.as_mut(), &ctx, rng)
    }
}
