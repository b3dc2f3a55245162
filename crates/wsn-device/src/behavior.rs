//! The `DeviceBehavior` trait: the extension point for protocol logic.

use wsn_core::{DeviceId, DeviceRng, Position, Timestamp};

use crate::{Device, RadioPacket};

/// An action a behavior wants applied to its own device.
///
/// Intents are collected from a callback and applied in order by the owner
/// of the `DeviceStore` before the next device is stepped.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Put a packet on the air (source is stamped on send).
    Transmit(RadioPacket),

    /// Switch the radio to listening.
    Listen,

    /// Power the radio down.
    RadioOff,

    /// Fire `on_timer(tag)` `after` ticks from now (minimum one).
    SetTimer { after: u64, tag: u32 },

    /// Drop pending alarms carrying `tag`.
    CancelTimer(u32),

    /// Start drawing `mA` from the battery (sensor, MCU, …).
    RegisterDrain(f64),

    /// Stop drawing `mA`.
    RemoveDrain(f64),

    /// Move the device.
    MoveTo(Position),

    /// The device has just taken the cluster-head role.  Emit once per
    /// transition; every emission is counted as an election.
    BecomeClusterHead,
}

/// Read-only view handed to every behavior callback.
pub struct DeviceContext<'a> {
    pub now:    Timestamp,
    pub device: &'a Device,
}

impl<'a> DeviceContext<'a> {
    #[inline]
    pub fn new(now: Timestamp, device: &'a Device) -> Self {
        Self { now, device }
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.device.id()
    }
}

/// Pluggable per-device protocol logic.
///
/// Each device owns its own behavior instance, so implementations keep their
/// protocol state (neighbor sets, role) in `self`.  All hooks default to
/// doing nothing; the base device is passive.
///
/// The clustering accessors (`is_cluster_head`, `neighbors`, `subscription`)
/// are what the statistics aggregator reads.
pub trait DeviceBehavior: Send + 'static {
    /// Per-tick hook, called after due timers and transmission completion.
    fn step(&mut self, _ctx: &DeviceContext<'_>, _rng: &mut DeviceRng) -> Vec<Intent> {
        vec![]
    }

    /// A timer scheduled with `Intent::SetTimer` fired.
    fn on_timer(&mut self, _tag: u32, _ctx: &DeviceContext<'_>, _rng: &mut DeviceRng) -> Vec<Intent> {
        vec![]
    }

    /// This device finished sending `packet`.
    fn radio_callback_tx(
        &mut self,
        _packet: &RadioPacket,
        _ctx:    &DeviceContext<'_>,
        _rng:    &mut DeviceRng,
    ) -> Vec<Intent> {
        vec![]
    }

    /// A packet reached this device.  A corrupted packet's payload must be
    /// treated as lost.
    fn radio_callback_rx(
        &mut self,
        _packet:    &RadioPacket,
        _strength:  u8,
        _corrupted: bool,
        _ctx:       &DeviceContext<'_>,
        _rng:       &mut DeviceRng,
    ) -> Vec<Intent> {
        vec![]
    }

    fn is_cluster_head(&self) -> bool {
        false
    }

    /// Devices this one has discovered.  Empty means the device is a loner.
    fn neighbors(&self) -> &[DeviceId] {
        &[]
    }

    /// The cluster head this device is subscribed to, if any.
    fn subscription(&self) -> Option<DeviceId> {
        None
    }
}
