//! Random sources for weight seeding and data generation
//!
//! Nothing in the crate keeps a global generator. Every operation that draws
//! random numbers takes `&mut R where R: rand::Rng`, so callers choose between
//! a reproducible seeded source and an entropy-seeded one.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic generator: the same seed always yields the same sequence.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generator seeded from operating-system entropy.
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Seeded generator when `seed` is given, entropy-seeded otherwise.
pub fn seeded_or_entropy(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => seeded(seed),
        None => from_entropy(),
    }
}
