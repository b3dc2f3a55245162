//! `wsn-core`: foundational types for the `wsn_sim` sensor network simulator.
//!
//! This crate is a dependency of every other `wsn-*` crate.  It intentionally
//! has no `wsn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `DeviceId`                                            |
//! | [`geo`]         | `Position`, Euclidean distance                        |
//! | [`time`]        | `Timestamp`, `SimConfig`                              |
//! | [`battery`]     | `BatteryProfile`, Peukert projection, `Lifetime`      |
//! | [`rng`]         | `DeviceRng` (per-device), `SimRng` (global)           |
//! | [`error`]       | `WsnError`, `WsnResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod battery;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use battery::{BatteryProfile, Lifetime, DEFAULT_PEUKERT_EXPONENT};
pub use error::{WsnError, WsnResult};
pub use geo::Position;
pub use ids::DeviceId;
pub use rng::{DeviceRng, SimRng};
pub use time::{SimConfig, Timestamp};
