//! Utility functions for the nimlab crate

use rand::{SeedableRng, rngs::StdRng};

/// Seeded RNG when a seed is supplied, OS-seeded otherwise.
pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}
