//! `wsn-mesh`: the clustered mesh network and its statistics.
//!
//! # Per-device step
//!
//! ```text
//! MeshWsn::step(device, now):
//!   ① Completion: if the device's packet leaves the air at `now`, the
//!                  medium delivers it to every listening radio in range
//!                  (radio_callback_rx), then radio_callback_tx fires.
//!   ② Timers:     due alarms fire on_timer(tag), earliest first.
//!   ③ Step:       DeviceBehavior::step.
//!   Every callback's intents are applied before the next callback runs.
//!
//! MeshWsn::tick_complete(now):
//!   derive (device, head, symmetric) connections from subscriptions.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Per-device power statistics computed with Rayon.         |
//! | `fx-hash`  | FxHash for the cluster-head subscriber tally.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wsn_core::SimConfig;
//! use wsn_mesh::{ClusterConfig, ClusterMeshDev, MeshWsnBuilder};
//! use wsn_sim::NoopObserver;
//!
//! let cluster = ClusterConfig::default();
//! let (mut env, mut mesh) = MeshWsnBuilder::new(config.clone())
//!     .populate(&positions, |_| ClusterMeshDev::new(cluster.clone()))
//!     .build()?;
//! env.run_until(config.end(), &mut mesh, &mut NoopObserver);
//! println!("{}", mesh.statistics());
//! ```

pub mod builder;
pub mod cluster;
pub mod connection;
pub mod error;
pub mod medium;
pub mod mesh;
pub mod message;
pub mod stats;


pub use builder::MeshWsnBuilder;
pub use cluster::{ClusterConfig, ClusterMeshDev, ClusterRole};
pub use connection::Connection;
pub use error::{MeshError, MeshResult};
pub use medium::{Medium, MediumConfig};
pub use mesh::{MeshCounters, MeshWsn};
pub use message::MeshMessage;
pub use stats::{MeshStats, PowerStats};
