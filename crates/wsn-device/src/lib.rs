//! `wsn-device`: per-device state for the `wsn_sim` simulator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`power`]    | `PowerLedger`: append-only, mutex-guarded drain log         |
//! | [`radio`]    | `Radio`, `RadioConfig`, `RadioState`, duty-cycle accounting  |
//! | [`packet`]   | `RadioPacket`                                                |
//! | [`timer`]    | `Timer`: per-device alarm queue                             |
//! | [`device`]   | `Device`: position + radio + timer + ledger                 |
//! | [`behavior`] | `DeviceBehavior` trait, `Intent`, `DeviceContext`            |
//! | [`passive`]  | `PassiveBehavior`: never acts                               |
//! | [`store`]    | `DeviceStore` arena                                          |
//! | [`builder`]  | `DeviceStoreBuilder`                                         |
//! | [`loader`]   | CSV device-layout loader                                     |
//!
//! # Design notes
//!
//! Devices are owned by a single `DeviceStore` arena and addressed by
//! `DeviceId`.  Behavior callbacks never mutate their device directly: they
//! read a [`DeviceContext`] and return [`Intent`]s that the owner of the
//! store applies in order.  This keeps every mutation on the single-threaded
//! step loop.

pub mod behavior;
pub mod builder;
pub mod device;
pub mod error;
pub mod loader;
pub mod packet;
pub mod passive;
pub mod power;
pub mod radio;
pub mod store;
pub mod timer;

#[cfg(test)]
mod tests;

pub use behavior::{DeviceBehavior, DeviceContext, Intent};
pub use builder::DeviceStoreBuilder;
pub use device::Device;
pub use error::{DeviceError, DeviceResult};
pub use loader::{load_layout_csv, load_layout_reader};
pub use packet::RadioPacket;
pub use passive::PassiveBehavior;
pub use power::{PowerEvent, PowerLedger};
pub use radio::{Radio, RadioConfig, RadioState, Transmission};
pub use store::DeviceStore;
pub use timer::Timer;
