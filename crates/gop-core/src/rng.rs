//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug)]
pub struct SystemRng(StdRng);

impl SystemRng {
    /// Creates an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Creates an RNG with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for SystemRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random()
    }
}

/// Returns a uniformly chosen element of `items`, or `None` when empty.
pub fn choose<'a, T>(rng: &mut dyn DeterministicRng, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let last = u32::try_from(items.len() - 1).unwrap_or(u32::MAX);
    let index = rng.next_u32_range(0, last) as usize;
    items.get(index.min(items.len() - 1))
}

/// Shuffles `items` in place (Fisher-Yates).
pub fn shuffle<T>(rng: &mut dyn DeterministicRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let upper = u32::try_from(i).unwrap_or(u32::MAX);
        let j = (rng.next_u32_range(0, upper) as usize).min(i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_stays_in_range() {
        let mut rng = SystemRng::seeded(7);
        for _ in 0..100 {
            let value = rng.next_u32_range(3, 5);
            assert!((3..=5).contains(&value));
        }
    }

    #[test]
    fn test_choose_on_empty_slice_returns_none() {
        let mut rng = SystemRng::seeded(1);
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        // Arrange
        let mut rng = SystemRng::seeded(42);
        let mut items = vec![1, 2, 3, 4, 5, 6];

        // Act
        shuffle(&mut rng, &mut items);

        // Assert
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);
    }
}
