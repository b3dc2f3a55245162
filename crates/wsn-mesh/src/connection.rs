//! Links between device pairs.

use wsn_core::DeviceId;

/// A link from `first` to `second`.
///
/// `symmetric` means each side currently lists the other as a neighbor, so
/// traffic can flow both ways.  Connections are owned by the aggregator and
/// replaced wholesale whenever the topology is re-derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    pub first:     DeviceId,
    pub second:    DeviceId,
    pub symmetric: bool,
}

impl Connection {
    pub fn new(first: DeviceId, second: DeviceId, symmetric: bool) -> Self {
        Self { first, second, symmetric }
    }

    #[inline]
    pub fn endpoints(&self) -> [DeviceId; 2] {
        [self.first, self.second]
    }
}
