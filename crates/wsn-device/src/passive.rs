//! A behavior that never acts.

use crate::DeviceBehavior;

/// A [`DeviceBehavior`] that keeps every default: no intents, never a
/// cluster head, no neighbors.
///
/// Useful in tests or for devices that only occupy space.
pub struct PassiveBehavior;

impl DeviceBehavior for PassiveBehavior {}
