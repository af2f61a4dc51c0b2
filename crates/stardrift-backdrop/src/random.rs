//! Injectable randomness for star placement and shooting star spawns.
//!
//! The backdrop never calls a global RNG; everything draws from a
//! [`RandomSource`] so tests can pin outcomes and a configured seed can make
//! a run reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[min, max)`.
    fn between(&mut self, (min, max): (f32, f32)) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// `true` with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

/// ChaCha8-backed source, seeded explicitly or from the thread RNG.
pub struct ChaChaRandom {
    rng: ChaCha8Rng,
}

impl ChaChaRandom {
    /// Deterministic source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Non-deterministic source.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

impl RandomSource for ChaChaRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Build the source a configuration asks for.
pub fn source_for_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(ChaChaRandom::seeded(seed)),
        None => Box::new(ChaChaRandom::from_entropy()),
    }
}

/// Returns the same sample forever.
///
/// `FixedRandom::new(0.0)` makes every probability check succeed;
/// `FixedRandom::new(0.999)` makes every check with `p < 0.999` fail.
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(f32);

impl FixedRandom {
    /// Values outside `[0, 1)` are clamped into it.
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0 - f32::EPSILON))
    }
}

impl RandomSource for FixedRandom {
    fn next_f32(&mut self) -> f32 {
        self.0
    }
}

/// Cycles through a scripted list of samples.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f32>,
    index: usize,
}

impl SequenceRandom {
    /// An empty list behaves like `FixedRandom::new(0.0)`.
    pub fn new(values: Vec<f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
