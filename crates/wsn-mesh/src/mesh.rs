//! `MeshWsn`: the device population, its links, and the event counters.

use tracing::{debug, info, warn};

use wsn_core::{DeviceId, SimConfig, SimRng, Timestamp};
use wsn_device::{DeviceStore, Intent, RadioPacket, Transmission};
use wsn_sim::Steppable;

use crate::{Connection, Medium, MeshStats};

/// Network-wide event counters.
///
/// Monotonic: incremented only through the `log_*` methods on [`MeshWsn`],
/// never decremented.  Each real occurrence must be logged exactly once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshCounters {
    pub transmits:     u64,
    pub receives:      u64,
    pub corrupted:     u64,
    pub cluster_heads: u64,
}

/// The aggregator.
///
/// Owns every device (through the [`DeviceStore`] arena) and every
/// connection.  Implements [`Steppable<DeviceId>`] so a
/// [`SimEnv`][wsn_sim::SimEnv] can drive it.
///
/// Create via [`MeshWsnBuilder`][crate::MeshWsnBuilder].
pub struct MeshWsn {
    /// Run configuration (window, battery, ticks per hour, …).
    pub config: SimConfig,

    /// Device arena.
    pub store: DeviceStore,

    /// The shared radio channel.
    pub medium: Medium,

    /// Channel-level randomness (corruption draws).
    pub rng: SimRng,

    /// Re-derive connections from subscriptions at the end of every tick.
    /// Disable when an external topology collaborator calls
    /// [`set_connections`](Self::set_connections).
    pub derive_connections: bool,

    pub(crate) connections: Vec<Connection>,
    pub(crate) counters:    MeshCounters,
    /// One past the last tick that completed.
    pub(crate) elapsed:     Timestamp,
}

impl MeshWsn {
    // ── Event log ─────────────────────────────────────────────────────────

    pub fn log_transmit(&mut self) {
        self.counters.transmits += 1;
    }

    pub fn log_receive(&mut self) {
        self.counters.receives += 1;
    }

    pub fn log_corruption(&mut self) {
        self.counters.corrupted += 1;
    }

    pub fn log_cluster_head(&mut self, head: DeviceId) {
        self.counters.cluster_heads += 1;
        info!(%head, elections = self.counters.cluster_heads, "cluster head elected");
    }

    pub fn counters(&self) -> MeshCounters {
        self.counters
    }

    // ── Topology ──────────────────────────────────────────────────────────

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Replace the connection set with one supplied by a topology
    /// collaborator.
    pub fn set_connections(&mut self, connections: Vec<Connection>) {
        self.connections = connections;
    }

    pub fn device_count(&self) -> usize {
        self.store.count
    }

    /// One past the last completed tick; the end of the statistics window.
    pub fn elapsed(&self) -> Timestamp {
        self.elapsed
    }

    /// Snapshot the network-wide statistics as of the last completed tick.
    pub fn statistics(&self) -> MeshStats {
        MeshStats::collect(self)
    }

    /// Build `(device, head, symmetric)` triples from each behavior's
    /// subscription.
    fn rebuild_connections(&mut self) {
        let store = &self.store;
        self.connections = store
            .ids()
            .filter_map(|id| {
                let behavior = store.behavior(id)?;
                let head = behavior.subscription().filter(|&h| h != id)?;
                let head_behavior = store.behavior(head)?;
                let symmetric = behavior.neighbors().contains(&head)
                    && head_behavior.neighbors().contains(&id);
                Some(Connection::new(id, head, symmetric))
            })
            .collect();
    }

    // ── Intent application ────────────────────────────────────────────────

    fn apply(&mut self, id: DeviceId, intents: Vec<Intent>, now: Timestamp) {
        for intent in intents {
            let Some(device) = self.store.device_mut(id) else {
                return;
            };
            match intent {
                Intent::Transmit(packet) => match device.transmit(packet, now) {
                    Ok(_) => {
                        let position = device.position;
                        if let Some(tx) = device.radio().transmission() {
                            self.medium.record(id, position, tx);
                        }
                    }
                    Err(e) => warn!(device = %id, error = %e, "transmit dropped"),
                },
                Intent::Listen => device.listen(now),
                Intent::RadioOff => device.radio_off(now),
                Intent::SetTimer { after, tag } => {
                    // Saturates, so a `u64::MAX` delay parks the alarm past any run.
                    device.timer_mut().schedule(now + after.max(1), tag);
                }
                Intent::CancelTimer(tag) => {
                    device.timer_mut().cancel(tag);
                }
                Intent::RegisterDrain(ma) => device.register_power_drain(ma, now),
                Intent::RemoveDrain(ma) => device.remove_power_drain(ma, now),
                Intent::MoveTo(position) if position.is_finite() => device.position = position,
                Intent::MoveTo(position) => {
                    warn!(device = %id, %position, "non-finite move ignored");
                }
                Intent::BecomeClusterHead => self.log_cluster_head(id),
            }
        }
    }

    // ── Delivery ──────────────────────────────────────────────────────────

    /// Hand a finished transmission to every listening radio in range.
    fn deliver(&mut self, source: DeviceId, tx: &Transmission, now: Timestamp) {
        let Some(sender) = self.store.device(source) else {
            return;
        };
        let origin = sender.position;

        // (receiver, distance, collided): collected before any mutation.
        let hearers: Vec<(DeviceId, f64, bool)> = self
            .store
            .devices
            .iter()
            .filter(|d| d.id() != source && d.radio().is_listening())
            .filter_map(|d| {
                let distance = origin.distance_to(d.position);
                self.medium.in_range(distance).then(|| {
                    let collided = self.medium.collides(source, tx, d.id(), d.position);
                    (d.id(), distance, collided)
                })
            })
            .collect();

        for (receiver, distance, collided) in hearers {
            let corrupted = self.medium.corrupted(collided, distance, &mut self.rng);
            let strength = self.medium.strength(distance);
            if let Some(device) = self.store.device_mut(receiver) {
                device.record_receive(corrupted);
            }
            self.log_receive();
            if corrupted {
                self.log_corruption();
            }
            debug!(%source, %receiver, strength, corrupted, "delivered");

            let packet: &RadioPacket = &tx.packet;
            let intents = self.store.invoke(receiver, now, |b, ctx, rng| {
                b.radio_callback_rx(packet, strength, corrupted, ctx, rng)
            });
            self.apply(receiver, intents, now);
        }
    }
}

impl Steppable<DeviceId> for MeshWsn {
    fn step(&mut self, id: DeviceId, now: Timestamp) {
        // ① Completion
        let finished = self
            .store
            .device_mut(id)
            .and_then(|d| d.finish_transmission(now));
        if let Some(tx) = finished {
            self.log_transmit();
            self.deliver(id, &tx, now);
            let intents = self
                .store
                .invoke(id, now, |b, ctx, rng| b.radio_callback_tx(&tx.packet, ctx, rng));
            self.apply(id, intents, now);
        }

        // ② Timers
        let due = self
            .store
            .device_mut(id)
            .map(|d| d.timer_mut().drain_due(now))
            .unwrap_or_default();
        for tag in due {
            let intents = self.store.invoke(id, now, |b, ctx, rng| b.on_timer(tag, ctx, rng));
            self.apply(id, intents, now);
        }

        // ③ Step
        let intents = self.store.invoke(id, now, |b, ctx, rng| b.step(ctx, rng));
        self.apply(id, intents, now);
    }

    fn tick_complete(&mut self, now: Timestamp) {
        if self.derive_connections {
            self.rebuild_connections();
        }
        self.elapsed = now + 1;
        self.medium.prune(self.elapsed);
    }
}
