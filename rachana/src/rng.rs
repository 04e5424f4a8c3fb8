//! Seeded random source for scenario generation
//!
//! One generator is owned by the scenario maker and threaded through every
//! sampling call, so the same seed and configuration always yield the same
//! scenarios.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Uniform};

/// Deterministic random generator
#[derive(Clone, Debug)]
pub struct ScenarioRng {
    rng: SmallRng,
}

impl ScenarioRng {
    /// Create a generator from a seed. Every seed, including 0, is deterministic.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in [lo, hi]. Returns `lo` when the interval is empty.
    #[inline]
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        Uniform::new_inclusive(lo, hi).sample(&mut self.rng)
    }

    /// Uniform sample in [-tolerance, +tolerance]
    #[inline]
    pub fn symmetric(&mut self, tolerance: f64) -> f64 {
        let tol = tolerance.abs();
        self.uniform(-tol, tol)
    }

    /// Uniform index in [0, n). `n` must be non-zero.
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        self.rng.gen_range(0..n)
    }

    /// Fair coin flip
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
