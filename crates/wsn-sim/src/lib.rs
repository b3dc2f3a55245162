//! `wsn-sim`: the logical clock and step scheduler.
//!
//! # Tick loop
//!
//! ```text
//! step(delta):
//!   repeat delta times:
//!     observer.on_tick_start(now)
//!     for entity in registration order:
//!       world.step(entity, now)
//!     world.tick_complete(now)
//!     observer.on_tick_end(now, world)
//!     now += 1
//! ```
//!
//! `step(n)` is exactly `n` calls of `step(1)`: every entity observes every
//! intermediate timestamp, and one tick finishes before the next begins.
//!
//! # Ownership
//!
//! `SimEnv` owns only the timestamp and the ordered registry of entity
//! handles.  The entities themselves live in a `world` that implements
//! [`Steppable`] and is passed in by `&mut` on each call, so independent runs
//! never share state.

pub mod env;
pub mod error;
pub mod observer;


pub use env::{SimEnv, Steppable};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
