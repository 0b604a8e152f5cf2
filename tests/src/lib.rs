//! Shared fixtures for the kyberlink integration tests

use std::path::PathBuf;

use kyberlink_algorithms::poly::sampling::{SmallSampler, UniformSampler};
use kyberlink_algorithms::Polynomial;
use kyberlink_kem::{AcceleratorKind, ServiceConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Deterministic RNG for reproducible test inputs
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Uniform polynomial drawn from `rng`
pub fn uniform(rng: &mut ChaCha20Rng) -> Polynomial {
    UniformSampler::sample(rng)
}

/// Small-coefficient polynomial drawn from `rng`
pub fn small(rng: &mut ChaCha20Rng) -> Polynomial {
    SmallSampler::sample(rng)
}

/// Fresh per-test directory under the system temp dir
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kyberlink-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Service configuration writing its key file into `dir`
pub fn config_in(dir: &std::path::Path, accelerator: AcceleratorKind) -> ServiceConfig {
    ServiceConfig::default()
        .with_key_path(dir.join("kyber_keys.json"))
        .with_accelerator(accelerator)
}
