//! Seeded random streams, one per named system.
//!
//! Each stream seed is derived from the master seed and the stream name, so
//! adding or reordering systems never shifts the numbers another system sees.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: HashMap::new(),
        }
    }

    pub fn stream(&mut self, name: &str) -> SystemRng<'_> {
        let seed = self.seed;
        let entry = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(derive_seed(seed, name)));
        SystemRng { inner: entry }
    }
}

/// FNV-1a over the name, mixed with the master seed.
fn derive_seed(seed: u64, name: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash ^ seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407)
}

pub struct SystemRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for SystemRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
