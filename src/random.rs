//! Uniform random source
//!
//! Table choice, item choice and every die roll go through [`RandomSource`],
//! so a session can run on thread-local entropy, a seeded generator, or a
//! fixed sequence in tests.

use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers
pub trait RandomSource {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn between(&mut self, low: u64, high: u64) -> u64;

    /// Uniform index into a collection of `len` elements (`len > 0`)
    fn pick_index(&mut self, len: usize) -> usize {
        self.between(0, len.saturating_sub(1) as u64) as usize
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    /// Thread-local entropy
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngSource<StdRng> {
    /// Deterministic generator for reproducible sessions
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn between(&mut self, low: u64, high: u64) -> u64 {
        self.0.random_range(low..=high)
    }
}

/// Replays a fixed list of raw values, cycling when exhausted.
///
/// Each raw value `v` maps into the requested range as `low + v % span`, so
/// `FixedSequence::new([0])` always yields the lowest possible outcome.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: VecDeque<u64>,
}

impl FixedSequence {
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for FixedSequence {
    fn between(&mut self, low: u64, high: u64) -> u64 {
        let raw = match self.values.pop_front() {
            Some(v) => {
                self.values.push_back(v);
                v
            }
            None => 0,
        };
        let span = high - low;
        if span == u64::MAX {
            return raw;
        }
        low + raw % (span + 1)
    }
}
