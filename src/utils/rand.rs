pub use ::rand::Rng;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

use crate::utils::env::{self, VarError};

pub static ENV_RNG_SEED: &'static str = "SEED";

/// Seed taken from the `SEED` environment variable, if set.
pub fn env_seed() -> Result<Option<u64>, VarError> {
    env::var_opt::<_, u64>(ENV_RNG_SEED)
}

/// A reproducible generator for `Some(seed)`, an entropy-seeded one otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(val) => StdRng::seed_from_u64(val),
        None => StdRng::from_entropy(),
    }
}
