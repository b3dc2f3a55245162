//! `Device`: one positioned sensor node.

use wsn_core::{DeviceId, Position, Timestamp};

use crate::{DeviceResult, PowerLedger, Radio, RadioConfig, RadioPacket, Timer, Transmission};

/// A sensor node: a position, exactly one [`Radio`], one [`Timer`], and the
/// [`PowerLedger`] both of them draw from.
///
/// Identity is the `DeviceId` (its slot in the `DeviceStore` arena), so the
/// type is deliberately not `Clone`.
#[derive(Debug)]
pub struct Device {
    id:           DeviceId,
    /// Current position; behaviors move a device with `Intent::MoveTo`.
    pub position: Position,
    radio:        Radio,
    timer:        Timer,
    ledger:       PowerLedger,
}

impl Device {
    pub fn new(id: DeviceId, position: Position, radio: RadioConfig, now: Timestamp) -> Self {
        Self {
            id,
            position,
            radio: Radio::new(radio, now),
            timer: Timer::new(),
            ledger: PowerLedger::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[inline]
    pub fn radio(&self) -> &Radio {
        &self.radio
    }

    #[inline]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    #[inline]
    pub fn timer_mut(&mut self) -> &mut Timer {
        &mut self.timer
    }

    #[inline]
    pub fn ledger(&self) -> &PowerLedger {
        &self.ledger
    }

    /// Euclidean distance to `other`, metres.
    #[inline]
    pub fn distance_to(&self, other: &Device) -> f64 {
        self.position.distance_to(other.position)
    }

    // ── Radio ─────────────────────────────────────────────────────────────

    pub fn listen(&mut self, now: Timestamp) {
        self.radio.listen(&self.ledger, now);
    }

    pub fn radio_off(&mut self, now: Timestamp) {
        self.radio.turn_off(&self.ledger, now);
    }

    /// Stamp `packet` with this device's ID and put it on the air.
    pub fn transmit(&mut self, mut packet: RadioPacket, now: Timestamp) -> DeviceResult<Timestamp> {
        packet.source = self.id;
        self.radio.transmit(self.id, packet, &self.ledger, now)
    }

    pub fn finish_transmission(&mut self, now: Timestamp) -> Option<Transmission> {
        self.radio.finish_transmission(&self.ledger, now)
    }

    pub fn record_receive(&mut self, corrupted: bool) {
        self.radio.record_receive(corrupted);
    }

    // ── Power ─────────────────────────────────────────────────────────────

    pub fn register_power_drain(&self, power_ma: f64, now: Timestamp) {
        self.ledger.register_drain(power_ma, now);
    }

    pub fn remove_power_drain(&self, power_ma: f64, now: Timestamp) {
        self.ledger.remove_drain(power_ma, now);
    }

    /// Instantaneous draw for every tick in `[first, last)`, mA.
    pub fn power_usage(&self, first: Timestamp, last: Timestamp) -> Vec<f64> {
        self.ledger.power_usage(first, last)
    }

    /// Charge consumed over `[first, last)`, mAh.
    pub fn power_usage_avg(&self, first: Timestamp, last: Timestamp, ticks_per_hour: u64) -> f64 {
        self.ledger.usage_mah(first, last, ticks_per_hour)
    }

    /// Mean draw over `[first, last)`, mA.
    pub fn average_current_ma(&self, first: Timestamp, last: Timestamp) -> f64 {
        self.ledger.average_ma(first, last)
    }
}
