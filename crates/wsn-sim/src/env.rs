//! `SimEnv`: the logical clock and entity registry.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use wsn_core::Timestamp;

use crate::{NoopObserver, SimError, SimObserver, SimResult};

/// A world whose entities can be advanced one tick at a time.
///
/// `H` is the handle type the world hands out for its entities (e.g.
/// `DeviceId`).
pub trait Steppable<H> {
    /// Advance one entity through tick `now`.
    fn step(&mut self, entity: H, now: Timestamp);

    /// Called once after every entity stepped through `now`.
    fn tick_complete(&mut self, _now: Timestamp) {}
}

/// The simulation clock.
///
/// Holds the current timestamp (starting at 0) and the registration-ordered
/// list of entities to step.  Entities cannot be detached.
pub struct SimEnv<H> {
    now:      Timestamp,
    entities: Vec<H>,
    attached: HashSet<H>,
}

impl<H: Copy + Eq + Hash + Debug> Default for SimEnv<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + Eq + Hash + Debug> SimEnv<H> {
    pub fn new() -> Self {
        Self {
            now:      Timestamp::ZERO,
            entities: Vec::new(),
            attached: HashSet::new(),
        }
    }

    /// The current logical time.
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.now
    }

    /// Register `entity` to be stepped every tick, after all entities
    /// attached before it.
    ///
    /// Attaching the same entity twice is a configuration error.
    pub fn attach(&mut self, entity: H) -> SimResult<()> {
        if !self.attached.insert(entity) {
            return Err(SimError::AlreadyAttached(format!("{entity:?}")));
        }
        tracing::debug!(?entity, position = self.entities.len(), "attached entity");
        self.entities.push(entity);
        Ok(())
    }

    /// Attach every entity yielded by `entities`, stopping at the first
    /// duplicate.
    pub fn attach_all<I: IntoIterator<Item = H>>(&mut self, entities: I) -> SimResult<()> {
        entities.into_iter().try_for_each(|e| self.attach(e))
    }

    /// Registered entities in step order.
    pub fn entities(&self) -> &[H] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advance `delta` ticks, stepping every entity once per tick.
    pub fn step<W: Steppable<H>>(&mut self, delta: u64, world: &mut W) {
        self.step_observed(delta, world, &mut NoopObserver);
    }

    /// Like [`step`](Self::step) with observer callbacks around each tick.
    pub fn step_observed<W, O>(&mut self, delta: u64, world: &mut W, observer: &mut O)
    where
        W: Steppable<H>,
        O: SimObserver<W>,
    {
        for _ in 0..delta {
            let now = self.now;
            observer.on_tick_start(now);
            for &entity in &self.entities {
                world.step(entity, now);
            }
            world.tick_complete(now);
            observer.on_tick_end(now, world);
            self.now = now + 1;
        }
    }

    /// Step until the clock reaches `end`, then notify `on_sim_end`.
    ///
    /// Does nothing but the final notification if the clock is already at
    /// or past `end`.
    pub fn run_until<W, O>(&mut self, end: Timestamp, world: &mut W, observer: &mut O)
    where
        W: Steppable<H>,
        O: SimObserver<W>,
    {
        let remaining = end.since(self.now);
        self.step_observed(remaining, world, observer);
        tracing::info!(now = %self.now, entities = self.entities.len(), "run complete");
        observer.on_sim_end(self.now, world);
    }
}
