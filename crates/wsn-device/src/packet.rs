//! Radio packets.

use wsn_core::DeviceId;

/// A frame handed to [`Radio::transmit`][crate::Radio::transmit].
///
/// `source` is stamped by the device that sends it.  A `destination` of
/// `None` is a broadcast; unicast packets are still heard by every listening
/// radio in range, and receivers filter with [`is_for`](Self::is_for).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioPacket {
    pub source:        DeviceId,
    pub destination:   Option<DeviceId>,
    pub payload:       Vec<u8>,
    /// Ticks the packet occupies the channel.
    pub airtime_ticks: u64,
}

impl RadioPacket {
    pub fn broadcast(payload: Vec<u8>, airtime_ticks: u64) -> Self {
        Self {
            source: DeviceId::INVALID,
            destination: None,
            payload,
            airtime_ticks,
        }
    }

    pub fn unicast(to: DeviceId, payload: Vec<u8>, airtime_ticks: u64) -> Self {
        Self {
            source: DeviceId::INVALID,
            destination: Some(to),
            payload,
            airtime_ticks,
        }
    }

    #[inline]
    pub fn is_broadcast(&self) -> bool {
        self.destination.is_none()
    }

    /// `true` for broadcasts and for packets addressed to `device`.
    #[inline]
    pub fn is_for(&self, device: DeviceId) -> bool {
        self.destination.is_none_or(|d| d == device)
    }
}
