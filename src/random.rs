//! Injectable randomness

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniform randomness behind every draw a life makes.
///
/// Anything implementing [`RngCore`] qualifies. Two lives built from the same seed
/// against the same catalog replay identically.
pub trait RandomSource: RngCore {
    /// Uniform float in `[0, 1)`
    #[inline]
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {}

/// Deterministic source for replayable lives
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
