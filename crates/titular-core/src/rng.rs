//! Injectable randomness for engine startup.
//!
//! An engine draws its starting phrase index and startup delay from a
//! [`RandomSource`] it is given at construction. Nothing is ambient: tests
//! hand in a [`FixedRandom`] instead of patching a process-wide generator.

use rand::Rng;
use std::time::Duration;

/// Source of startup randomness for a [`Typewriter`](crate::Typewriter).
pub trait RandomSource {
    /// Uniform index in `[0, bound)`. `bound` is at least 1.
    fn pick_index(&mut self, bound: usize) -> usize;

    /// Uniform duration in `[min, max)`.
    fn pick_delay(&mut self, min: Duration, max: Duration) -> Duration;
}

/// Thread-local randomness via the `rand` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        rand::rng().random_range(0..bound)
    }

    fn pick_delay(&mut self, min: Duration, max: Duration) -> Duration {
        if max <= min {
            return min;
        }
        rand::rng().random_range(min..max)
    }
}

/// Fixed values, for deterministic tests and reproducible demos.
///
/// Returns its configured values verbatim: `index` reduced modulo the bound,
/// `delay` regardless of the requested range (so a test can force a zero
/// startup delay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedRandom {
    /// Index returned by [`RandomSource::pick_index`] (modulo the bound).
    pub index: usize,
    /// Delay returned by [`RandomSource::pick_delay`].
    pub delay: Duration,
}

impl Default for FixedRandom {
    fn default() -> Self {
        Self {
            index: 0,
            delay: Duration::ZERO,
        }
    }
}

impl RandomSource for FixedRandom {
    fn pick_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            0
        } else {
            self.index % bound
        }
    }

    fn pick_delay(&mut self, _min: Duration, _max: Duration) -> Duration {
        self.delay
    }
}
