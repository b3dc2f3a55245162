//! Observer hooks invoked by [`SimEnv`][crate::SimEnv] around each tick.

use wsn_core::Timestamp;

/// Callbacks at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `W` is the world being stepped; the
/// end-of-tick hook gets read-only access to it for data collection.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress { interval: u64 }
///
/// impl<W> SimObserver<W> for Progress {
///     fn on_tick_end(&mut self, now: Timestamp, _world: &W) {
///         if now.0 % self.interval == 0 {
///             tracing::info!(%now, "progress");
///         }
///     }
/// }
/// ```
pub trait SimObserver<W> {
    /// Called at the very start of each tick, before any entity steps.
    fn on_tick_start(&mut self, _now: Timestamp) {}

    /// Called after every entity stepped and the world closed the tick.
    fn on_tick_end(&mut self, _now: Timestamp, _world: &W) {}

    /// Called once by [`SimEnv::run_until`][crate::SimEnv::run_until] after
    /// the final tick.
    fn on_sim_end(&mut self, _final: Timestamp, _world: &W) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<W> SimObserver<W> for NoopObserver {}
