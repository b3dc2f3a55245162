//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Timestamp` counter of logical ticks.
//! The only mapping to physical time is `SimConfig::ticks_per_hour`, used
//! when integrating current draw (mA) into charge (mAh):
//!
//!   hours = ticks / ticks_per_hour
//!
//! The default resolution is one tick per millisecond.

use std::fmt;

use crate::{BatteryProfile, WsnError, WsnResult, DEFAULT_PEUKERT_EXPONENT};

/// Default resolution: 1 tick = 1 ms.
pub const DEFAULT_TICKS_PER_HOUR: u64 = 3_600_000;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// An absolute logical timestamp, starting at 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    /// Return the timestamp `n` ticks after `self`, saturating at
    /// `u64::MAX`.
    #[inline]
    pub fn offset(self, n: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Chosen by the application (CLI flags, a config file, …) and handed to
/// the mesh builder.  The core treats the battery figures as opaque numbers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// How many ticks make one hour.  Default: 3,600,000 (1 tick = 1 ms).
    pub ticks_per_hour: u64,

    /// Warm-up ticks excluded from power statistics.
    pub stabilization_ticks: u64,

    /// Battery fitted to every device.
    pub battery: BatteryProfile,

    /// Peukert exponent used for lifetime projection (typically 1.1–1.3).
    pub peukert_exponent: f64,

    /// Write output every N ticks.  0 disables periodic output.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           DEFAULT_TICKS_PER_HOUR / 60,
            seed:                  0,
            ticks_per_hour:        DEFAULT_TICKS_PER_HOUR,
            stabilization_ticks:   0,
            battery:               BatteryProfile::TWO_E91_AA,
            peukert_exponent:      DEFAULT_PEUKERT_EXPONENT,
            output_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The timestamp at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end(&self) -> Timestamp {
        Timestamp(self.total_ticks)
    }

    /// Reject parameter combinations that make the numeric model meaningless.
    pub fn validate(&self) -> WsnResult<()> {
        if self.ticks_per_hour == 0 {
            return Err(WsnError::Config("ticks_per_hour must be positive".into()));
        }
        if !self.peukert_exponent.is_finite() || self.peukert_exponent < 1.0 {
            return Err(WsnError::Config(format!(
                "peukert exponent {} must be a finite value >= 1.0",
                self.peukert_exponent
            )));
        }
        self.battery.validate()
    }
}
