//! Injectable random sources.
//!
//! Cosmetic randomness (feed order, captions, glitches) only needs to look
//! unpredictable. Production prefers an OS-seeded strong generator and falls
//! back to a fast one when the OS entropy source does not answer; tests plug
//! in seeded or scripted sources.

use rand::rngs::{OsRng, SmallRng, StdRng};
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Uniform random numbers for cosmetic use.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Integer in `[0, n)`; 0 when `n` is 0.
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }

    /// Integer in `[min, max]` (bounds swapped if reversed).
    fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (hi as i64 - lo as i64 + 1) as f64;
        let offset = (self.next_f32() as f64 * span).floor() as i64;
        (lo as i64 + offset).min(hi as i64) as i32
    }
}

/// Uniform in-place permutation (Fisher–Yates).
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

/// The source picked at startup.
#[derive(Debug)]
pub enum SystemRandom {
    /// Cryptographically strong generator seeded from the OS.
    Strong(StdRng),
    /// Fast generator seeded from the wall clock.
    Weak(SmallRng),
}

impl SystemRandom {
    /// Use the OS entropy source when it answers, otherwise fall back.
    pub fn detect() -> Self {
        let mut seed = [0u8; 32];
        match OsRng.try_fill_bytes(&mut seed) {
            Ok(()) => SystemRandom::Strong(StdRng::from_seed(seed)),
            Err(e) => {
                log::debug!("OS entropy unavailable ({}), using clock-seeded generator", e);
                SystemRandom::Weak(SmallRng::seed_from_u64(clock_seed()))
            }
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, SystemRandom::Strong(_))
    }
}

impl RandomSource for SystemRandom {
    fn next_u32(&mut self) -> u32 {
        match self {
            SystemRandom::Strong(rng) => rng.next_u32(),
            SystemRandom::Weak(rng) => rng.next_u32(),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}

/// Reproducible source for tests and replays.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}

/// Replays a fixed list of values, cycling when exhausted. An empty list
/// yields zeros.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
