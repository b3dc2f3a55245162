//! Plain data rows written by output backends.

/// Network-wide counters at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub transmits:   u64,
    pub receives:    u64,
    pub corrupted:   u64,
    pub connections: u64,
}

/// One device's state at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceReportRow {
    pub device_id:    u32,
    pub x:            f64,
    pub y:            f64,
    pub is_head:      bool,
    pub neighbors:    u32,
    /// Fraction of the run the radio was active, `[0, 1]`.
    pub duty_cycle:   f64,
    /// Charge consumed over the post-stabilization window, mAh.
    pub consumed_mah: f64,
}
