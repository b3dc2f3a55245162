//! `Timer`: a device's alarm queue.
//!
//! Alarms are keyed by due tick in a `BTreeMap`, so draining the due set is
//! O(log A) in the number of distinct due ticks.  Each alarm carries an
//! opaque `u32` tag chosen by the behavior.

use std::collections::BTreeMap;

use wsn_core::Timestamp;

#[derive(Debug, Default)]
pub struct Timer {
    alarms: BTreeMap<Timestamp, Vec<u32>>,
    total:  usize,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `tag` at tick `at`.
    pub fn schedule(&mut self, at: Timestamp, tag: u32) {
        self.alarms.entry(at).or_default().push(tag);
        self.total += 1;
    }

    /// Drop every pending alarm carrying `tag`.  Returns how many were removed.
    pub fn cancel(&mut self, tag: u32) -> usize {
        let mut removed = 0;
        self.alarms.retain(|_, tags| {
            let before = tags.len();
            tags.retain(|&t| t != tag);
            removed += before - tags.len();
            !tags.is_empty()
        });
        self.total -= removed;
        removed
    }

    /// Remove and return the tags of every alarm due at or before `now`,
    /// earliest first.
    pub fn drain_due(&mut self, now: Timestamp) -> Vec<u32> {
        let mut due = Vec::new();
        while let Some(entry) = self.alarms.first_entry() {
            if *entry.key() > now {
                break;
            }
            due.extend(entry.remove());
        }
        self.total -= due.len();
        due
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
