//! Bounded random helpers shared by every stochastic decision.

use rand::Rng;

/// Returns a random integer in `min..=max`.
///
/// An inverted range yields `min` instead of panicking.
pub fn random_int(rng: &mut impl Rng, min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Picks a uniformly random index into a collection of `len` elements.
///
/// Returns `None` for an empty collection.
pub fn random_index(rng: &mut impl Rng, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.random_range(0..len))
    }
}

/// Returns a random real in `min..=max`, or `min` when the range is empty.
pub fn random_real(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}
