//! Append-only power-draw ledger.
//!
//! # Design
//!
//! Every change in a device's current draw is recorded as a signed
//! [`PowerEvent`]: `+mA` when a consumer switches on, `-mA` when it switches
//! off.  The instantaneous draw at tick `t` is the sum of every event with
//! `at <= t`.
//!
//! Keeping raw events instead of a running average means the query window
//! can start after a warm-up period that was not known when the events were
//! recorded.  Because the log is append-only, a query over `[first, last)`
//! never changes once the clock has passed `last`.
//!
//! Callers must balance every `register_drain` with a matching
//! `remove_drain`; an unmatched removal drives the sum negative and makes
//! averages meaningless.  This is not checked.

use std::sync::{Mutex, MutexGuard, PoisonError};

use wsn_core::Timestamp;

/// One change in current draw.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerEvent {
    /// Signed change in draw, mA.
    pub delta_ma: f64,
    pub at:       Timestamp,
}

/// Chronologically ordered, mutex-guarded log of [`PowerEvent`]s.
///
/// Appends take `&self` so a drain can be registered from a radio callback
/// while the device itself is only shared-borrowed.
#[derive(Debug, Default)]
pub struct PowerLedger {
    events: Mutex<Vec<PowerEvent>>,
}

impl PowerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a consumer drawing `power_ma` switched on at `now`.
    pub fn register_drain(&self, power_ma: f64, now: Timestamp) {
        self.append(PowerEvent { delta_ma: power_ma, at: now });
    }

    /// Record that a consumer drawing `power_ma` switched off at `now`.
    pub fn remove_drain(&self, power_ma: f64, now: Timestamp) {
        self.append(PowerEvent { delta_ma: -power_ma, at: now });
    }

    fn append(&self, event: PowerEvent) {
        let mut events = self.lock();
        debug_assert!(
            events.last().is_none_or(|last| last.at <= event.at),
            "power events must be appended in chronological order"
        );
        events.push(event);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PowerEvent>> {
        // A panic while holding the lock cannot leave a half-written Vec push
        // behind, so a poisoned log is still consistent.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every recorded event in insertion order.
    pub fn events(&self) -> Vec<PowerEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Instantaneous draw at tick `at`, mA.
    pub fn current_ma(&self, at: Timestamp) -> f64 {
        self.lock()
            .iter()
            .take_while(|e| e.at <= at)
            .map(|e| e.delta_ma)
            .sum()
    }

    /// Instantaneous draw for every tick in `[first, last)`, mA.
    ///
    /// Returns an empty `Vec` when `first >= last`.
    pub fn power_usage(&self, first: Timestamp, last: Timestamp) -> Vec<f64> {
        if first >= last {
            return Vec::new();
        }
        let events = self.lock();
        let mut samples = Vec::with_capacity((last - first) as usize);
        let mut level = 0.0;
        let mut next = 0;

        for t in first.0..last.0 {
            while next < events.len() && events[next].at.0 <= t {
                level += events[next].delta_ma;
                next += 1;
            }
            samples.push(level);
        }
        samples
    }

    /// Integral of the draw over `[first, last)` in mA·ticks.
    ///
    /// Walks the event log once and multiplies each constant-draw segment by
    /// its length, so cost is O(events) regardless of window size.
    pub fn charge_ma_ticks(&self, first: Timestamp, last: Timestamp) -> f64 {
        if first >= last {
            return 0.0;
        }
        let events = self.lock();
        let mut level = 0.0;
        let mut total = 0.0;
        let mut cursor = first.0;

        for event in events.iter() {
            let at = event.at.0;
            if at >= last.0 {
                break;
            }
            if at > cursor {
                total += level * (at - cursor) as f64;
                cursor = at;
            }
            level += event.delta_ma;
        }
        total + level * (last.0 - cursor) as f64
    }

    /// Mean draw over `[first, last)`, mA.  Zero for an empty window.
    pub fn average_ma(&self, first: Timestamp, last: Timestamp) -> f64 {
        if first >= last {
            return 0.0;
        }
        self.charge_ma_ticks(first, last) / (last - first) as f64
    }

    /// Charge consumed over `[first, last)`, mAh.
    pub fn usage_mah(&self, first: Timestamp, last: Timestamp, ticks_per_hour: u64) -> f64 {
        if ticks_per_hour == 0 {
            return 0.0;
        }
        self.charge_ma_ticks(first, last) / ticks_per_hour as f64
    }
}
