//! Battery model: nameplate profiles and Peukert's-law lifetime projection.
//!
//! A battery rated for `capacity_mah` over `drainage_hours` delivers its
//! nameplate capacity only at the rated current `capacity / drainage`.  At
//! any other average draw `I` Peukert's law gives the runtime
//!
//! ```text
//! t = H · (C / (I · H))^p
//! ```
//!
//! where `p > 1` models the non-linear loss at high discharge rates.

use std::fmt;

use crate::{WsnError, WsnResult};

/// Peukert exponent used when the configuration does not override it.
pub const DEFAULT_PEUKERT_EXPONENT: f64 = 1.15;

const HOURS_PER_DAY: u64 = 24;
const DAYS_PER_YEAR: u64 = 365;

// ── BatteryProfile ────────────────────────────────────────────────────────────

/// Nameplate battery figures.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryProfile {
    pub capacity_mah:   f64,
    pub drainage_hours: f64,
}

impl BatteryProfile {
    /// A CR2032 lithium coin cell.
    pub const CR2032_COIN: BatteryProfile = BatteryProfile {
        capacity_mah:   240.0,
        drainage_hours: 1263.0,
    };

    /// Two Energizer E91 AA cells.
    pub const TWO_E91_AA: BatteryProfile = BatteryProfile {
        capacity_mah:   2500.0,
        drainage_hours: 250.0,
    };

    pub fn new(capacity_mah: f64, drainage_hours: f64) -> Self {
        Self { capacity_mah, drainage_hours }
    }

    /// The current at which the battery delivers exactly its nameplate capacity.
    #[inline]
    pub fn rated_current_ma(&self) -> f64 {
        self.capacity_mah / self.drainage_hours
    }

    pub fn validate(&self) -> WsnResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.capacity_mah) && ok(self.drainage_hours) {
            Ok(())
        } else {
            Err(WsnError::Config(format!(
                "battery capacity ({} mAh) and drainage time ({} h) must be positive",
                self.capacity_mah, self.drainage_hours
            )))
        }
    }

    /// Projected runtime in hours at an average draw of `current_ma`.
    ///
    /// Returns `None` for a zero, negative, or non-finite draw: there is no
    /// meaningful projection for a device that draws nothing.
    pub fn lifetime_hours(&self, current_ma: f64, peukert: f64) -> Option<f64> {
        if !current_ma.is_finite() || current_ma <= 0.0 {
            return None;
        }
        let h = self.drainage_hours;
        let hours = h * (self.capacity_mah.powf(peukert) / (current_ma * h).powf(peukert));
        hours.is_finite().then_some(hours)
    }

    /// Like [`lifetime_hours`](Self::lifetime_hours) but truncated to whole
    /// hours and broken down into years/days/hours.
    pub fn lifetime(&self, current_ma: f64, peukert: f64) -> Option<Lifetime> {
        self.lifetime_hours(current_ma, peukert)
            .map(|h| Lifetime::from_hours(h as u64))
    }
}

impl Default for BatteryProfile {
    fn default() -> Self {
        Self::TWO_E91_AA
    }
}

// ── Lifetime ──────────────────────────────────────────────────────────────────

/// A whole number of hours with a years/days/hours breakdown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lifetime {
    pub total_hours: u64,
}

impl Lifetime {
    pub fn from_hours(total_hours: u64) -> Self {
        Self { total_hours }
    }

    #[inline]
    pub fn years(&self) -> u64 {
        self.total_hours / (HOURS_PER_DAY * DAYS_PER_YEAR)
    }

    #[inline]
    pub fn days(&self) -> u64 {
        (self.total_hours / HOURS_PER_DAY) % DAYS_PER_YEAR
    }

    #[inline]
    pub fn hours(&self) -> u64 {
        self.total_hours % HOURS_PER_DAY
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} days and {} hours",
            self.years(),
            self.days(),
            self.hours()
        )
    }
}
