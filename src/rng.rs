//! Seed-threaded pseudo-random numbers
//!
//! Park-Miller "minimal standard" generator. There is no generator object:
//! every function takes a seed and hands back the next seed alongside its
//! value, so a run is replayed by replaying the same chain of calls.
//!
//! Constants:
//! - Multiplier (a): 16807
//! - Modulus (m): 2^31 - 1 = 2147483647

/// The entire state of the generator
pub type Seed = u32;

const MULTIPLIER: u64 = 16807;
const MODULUS: u64 = 2147483647; // 2^31 - 1

/// Advance the seed by one step
///
/// Seed 0 is a fixed point of the generator; callers that take user input
/// should pass it through [`normalize_seed`] first.
#[inline]
pub fn next_seed(seed: Seed) -> Seed {
    ((seed as u64 * MULTIPLIER) % MODULUS) as Seed
}

/// Map a seed into the generator's useful range `[1, m - 1]`
pub fn normalize_seed(seed: Seed) -> Seed {
    let reduced = (seed as u64 % MODULUS) as Seed;
    if reduced == 0 { 1 } else { reduced }
}

/// Raw unsigned value in `[0, m - 1)`
pub fn next_u32(seed: Seed) -> (Seed, u32) {
    let next = next_seed(seed);
    (next, next)
}

/// Double in `[0, 1)`
pub fn next_f64(seed: Seed) -> (Seed, f64) {
    let next = next_seed(seed);
    (next, next as f64 / MODULUS as f64)
}

/// Fair coin flip
pub fn next_bool(seed: Seed) -> (Seed, bool) {
    let (next, value) = next_f64(seed);
    (next, value < 0.5)
}

/// Integer in `[min, max]` (inclusive)
pub fn int_range(seed: Seed, min: i32, max: i32) -> (Seed, i32) {
    let (next, value) = next_f64(seed);
    if max <= min {
        return (next, min);
    }
    let span = (max as i64 - min as i64 + 1) as f64;
    (next, min + (value * span).floor() as i32)
}

/// Index in `[0, len)`; `len` must be non-zero
pub fn index(seed: Seed, len: usize) -> (Seed, usize) {
    let (next, value) = int_range(seed, 0, len.saturating_sub(1) as i32);
    (next, value as usize)
}

/// Double in `[min, max)`
pub fn f64_range(seed: Seed, min: f64, max: f64) -> (Seed, f64) {
    let (next, value) = next_f64(seed);
    (next, min + value * (max - min))
}

/// Fisher-Yates shuffle, returning a new ordering of `items`
pub fn shuffle<T: Clone>(seed: Seed, items: &[T]) -> (Seed, Vec<T>) {
    let mut result = items.to_vec();
    let mut seed = seed;
    for i in (1..result.len()).rev() {
        let (next, j) = int_range(seed, 0, i as i32);
        seed = next;
        result.swap(i, j as usize);
    }
    (seed, result)
}

/// Fresh seed from OS entropy, for dungeons created without one
pub fn random_seed() -> Seed {
    rand::random::<u32>() % 1_000_000 + 1
}
