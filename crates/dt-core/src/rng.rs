//! Explicit, single-threaded RNG handle.
//!
//! `RngHandle` wraps a single `SmallRng` seeded once from the run's
//! `seed` and threaded explicitly through the call graph, rather than
//! drawn from a process-wide generator. It is never shared across
//! threads — the only stage that draws random numbers (population
//! sampling) runs single-threaded before any `rayon` fan-out, so no
//! synchronization is ever needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Deterministic RNG handle, seeded once per generation run.
///
/// All draws during population sampling are made from one `RngHandle` in
/// a fixed order, so re-running with the same seed and inputs reproduces
/// the same probe set exactly (within one numeric backend).
pub struct RngHandle(SmallRng);

impl RngHandle {
    /// Seed deterministically from the run's configured seed.
    pub fn new(seed: u64) -> Self {
        RngHandle(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Draw a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Draw a uniform sample in `[0, 1)`.
    #[inline]
    pub fn uniform01(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }

    /// Choose an index in `[0, weights.len())` with probability proportional
    /// to `weights` (assumed to already sum to 1 — a probability simplex,
    /// as produced by the city-core importance weights).
    ///
    /// Falls back to the last index on floating-point round-off.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> usize {
        let u = self.uniform01();
        let mut acc = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            acc += w;
            if u < acc {
                return i;
            }
        }
        weights.len() - 1
    }
}
