//! Seeded RNG streams.
//!
//! One run seed fans out into independent streams: one per device (drawn
//! from by that device's behavior callbacks) and any number of
//! simulation-level streams (channel corruption draws, layout scattering).
//! Stream seeds come from a SplitMix64 finalizer over `(seed, stream)`, so
//! neighboring stream numbers get unrelated seeds and a run reproduces
//! exactly for a given seed no matter how many draws each stream makes.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::DeviceId;

/// Simulation-level streams start above every possible device stream.
const SIM_STREAM_BASE: u64 = 1 << 32;

fn stream_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed ^ stream.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn unit_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// A device's private stream, handed to its behavior callbacks.
pub struct DeviceRng(SmallRng);

impl DeviceRng {
    pub fn new(seed: u64, device: DeviceId) -> Self {
        DeviceRng(SmallRng::seed_from_u64(stream_seed(seed, device.0 as u64)))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.  NaN counts as 0.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(unit_probability(p))
    }
}

/// A simulation-level stream.  Only touched from the step loop.
pub struct SimRng {
    seed: u64,
    rng:  SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self::stream(seed, 0)
    }

    fn stream(seed: u64, n: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(stream_seed(seed, SIM_STREAM_BASE + n)),
        }
    }

    /// An independent stream derived from the same run seed.  Does not
    /// advance `self`.
    pub fn fork(&self, stream: u64) -> SimRng {
        Self::stream(self.seed, stream.wrapping_add(1))
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.rng.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(unit_probability(p))
    }
}
