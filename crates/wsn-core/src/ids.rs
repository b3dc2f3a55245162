//! Device identifiers.
//!
//! A `DeviceId` is a slot in the `DeviceStore` arena.  Neighbor sets,
//! subscriptions, and connections all hold `DeviceId`s, never references,
//! so topology bookkeeping cannot outlive or alias the devices it names.

use std::fmt;

/// Index of a device in the `DeviceStore` arena.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(pub u32);

impl DeviceId {
    /// Placeholder source of a packet that has not been sent yet.
    pub const INVALID: DeviceId = DeviceId(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "dev#{}", self.0)
        } else {
            f.write_str("dev#-")
        }
    }
}

impl TryFrom<usize> for DeviceId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<DeviceId, Self::Error> {
        u32::try_from(n).map(DeviceId)
    }
}
