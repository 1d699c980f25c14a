use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Conventional short folder names; picks may repeat within one tree.
pub const SHORT_NAMES: [&str; 10] = [
    "bin", "lib", "src", "tmp", "var", "log", "opt", "dev", "etc", "run",
];

/// Painful-to-type names, always used in this order.
pub const LONG_NAMES: [&str; 5] = [
    "extraordinarily_long_directory_name",
    "another_unnecessarily_verbose_directory",
    "final_directory_that_you_should_autocomplete",
    "ridiculously_specific_and_annoying_directory_name",
    "this_directory_name_is_way_too_long",
];

pub const RANDOM_NAME_LEN: usize = 6;

const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Directory name source. One instance per process, seeded once.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    /// Seed from wall-clock seconds
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::seeded(seed)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn short_name(&mut self) -> &'static str {
        SHORT_NAMES[self.rng.random_range(0..SHORT_NAMES.len())]
    }

    /// First three long names; deterministic on purpose.
    pub fn long_names(&self) -> [&'static str; 3] {
        [LONG_NAMES[0], LONG_NAMES[1], LONG_NAMES[2]]
    }

    /// `RANDOM_NAME_LEN` letters drawn uniformly from a-z and A-Z
    pub fn random_name(&mut self) -> String {
        (0..RANDOM_NAME_LEN)
            .map(|_| ALPHABET[self.rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
