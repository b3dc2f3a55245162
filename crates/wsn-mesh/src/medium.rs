//! The shared radio channel: reachability, signal strength, and corruption.
//!
//! A packet is heard by a device whose radio is listening when the packet
//! leaves the air and which lies within `range_m` of the sender.  It arrives
//! corrupted if
//!
//! - another transmission audible at the receiver overlapped its airtime
//!   (collision), or
//! - a Bernoulli draw with probability
//!   `base + (edge - base) * (d / range)^2` succeeds, so closer devices lose
//!   fewer packets.

use wsn_core::{DeviceId, Position, SimRng, Timestamp};
use wsn_device::Transmission;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MediumConfig {
    /// Maximum distance at which a packet can be heard, metres.
    pub range_m:         f64,
    /// Corruption probability right next to the sender.
    pub base_corruption: f64,
    /// Corruption probability at the edge of range.
    pub edge_corruption: f64,
}

impl Default for MediumConfig {
    fn default() -> Self {
        Self {
            range_m:         30.0,
            base_corruption: 0.01,
            edge_corruption: 0.25,
        }
    }
}

/// A transmission as the channel saw it start.
#[derive(Copy, Clone, Debug, PartialEq)]
struct AirRecord {
    source:   DeviceId,
    position: Position,
    started:  Timestamp,
    ends:     Timestamp,
}

pub struct Medium {
    pub config:   MediumConfig,
    history:      Vec<AirRecord>,
    max_airtime:  u64,
}

impl Medium {
    pub fn new(config: MediumConfig) -> Self {
        Self {
            config,
            history:     Vec::new(),
            max_airtime: 1,
        }
    }

    /// `true` if a receiver `distance_m` away can hear the sender.
    #[inline]
    pub fn in_range(&self, distance_m: f64) -> bool {
        distance_m <= self.config.range_m
    }

    /// Received signal strength: 255 at the sender, 0 at the edge of range.
    pub fn strength(&self, distance_m: f64) -> u8 {
        if self.config.range_m <= 0.0 {
            return 0;
        }
        let frac = (1.0 - distance_m / self.config.range_m).clamp(0.0, 1.0);
        (frac * 255.0).round() as u8
    }

    /// Probability that a packet over `distance_m` is corrupted by noise.
    pub fn corruption_probability(&self, distance_m: f64) -> f64 {
        let MediumConfig { range_m, base_corruption, edge_corruption } = self.config;
        if range_m <= 0.0 {
            return 1.0;
        }
        let r = (distance_m / range_m).clamp(0.0, 1.0);
        (base_corruption + (edge_corruption - base_corruption) * r * r).clamp(0.0, 1.0)
    }

    /// Note that `source` at `position` just put `tx` on the air.
    pub fn record(&mut self, source: DeviceId, position: Position, tx: &Transmission) {
        self.max_airtime = self.max_airtime.max(tx.ends.since(tx.started));
        self.history.push(AirRecord {
            source,
            position,
            started: tx.started,
            ends:    tx.ends,
        });
    }

    /// Forget transmissions that can no longer overlap anything still on
    /// the air at `now`.
    pub fn prune(&mut self, now: Timestamp) {
        let horizon = now.0.saturating_sub(self.max_airtime);
        self.history.retain(|r| r.ends.0 > horizon);
    }

    /// `true` if some other transmission audible at `receiver` overlapped
    /// `tx` (sent by `source`).  The receiver's own transmissions count: the
    /// radio is half-duplex, so airtime spent sending is airtime lost.
    pub fn collides(
        &self,
        source:   DeviceId,
        tx:       &Transmission,
        receiver: DeviceId,
        at:       Position,
    ) -> bool {
        self.history.iter().any(|r| {
            r.source != source
                && r.started < tx.ends
                && tx.started < r.ends
                && (r.source == receiver || self.in_range(r.position.distance_to(at)))
        })
    }

    /// Decide whether a delivery over `distance_m` is corrupted.
    pub fn corrupted(&self, collided: bool, distance_m: f64, rng: &mut SimRng) -> bool {
        collided || rng.gen_bool(self.corruption_probability(distance_m))
    }

    /// Transmissions currently remembered.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
