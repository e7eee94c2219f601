//! Random source construction.
//!
//! All stages take the generator as an explicit `&mut R: Rng` argument.
//! This module only decides how a run's generator is seeded.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
///
/// Two generators built from the same seed yield identical streams, which
/// makes whole runs reproducible.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed.
///
/// `None` draws a fresh seed from the thread-local generator.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
