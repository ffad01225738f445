//! Seeded pseudo-random sequence used for every arbitrary choice the planner
//! makes, so a given seed always yields the same itinerary ordering.

use rand::Rng;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233_280;

/// Where the seed came from. Unseeded runs draw fresh entropy but still
/// report the seed they used, so the result can be replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Explicit(String),
    Unseeded,
}

impl SeedSource {
    pub fn from_option(seed: Option<&str>) -> Self {
        match seed.map(str::trim) {
            Some(seed) if !seed.is_empty() => SeedSource::Explicit(seed.to_string()),
            _ => SeedSource::Unseeded,
        }
    }

    /// The concrete seed string to hash.
    pub fn resolve(&self) -> String {
        match self {
            SeedSource::Explicit(seed) => seed.clone(),
            SeedSource::Unseeded => format!("{:08x}", rand::thread_rng().gen::<u32>()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        Self {
            state: u64::from(hash_seed(seed)),
        }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    /// Fisher-Yates shuffle, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_index(items.len());
        items.get(index)
    }
}

/// 32-bit rolling string hash (`h * 31 + c`, wrapping), made non-negative.
fn hash_seed(seed: &str) -> u32 {
    let hash = seed.chars().fold(0i32, |h, c| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(c as i32)
    });
    hash.unsigned_abs()
}
