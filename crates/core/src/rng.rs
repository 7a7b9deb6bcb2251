//! RNG module - injectable random source for tile spawning
//!
//! The engine never reaches for a global generator. Anything implementing
//! [`TileRng`] can drive spawns; [`SimpleRng`] is the seeded default so a
//! game can be replayed from its seed.

use crate::types::FOUR_TILE_PERCENT;

/// Random source used by the grid engine
pub trait TileRng {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of `next_u32` (multiply-shift), since the low bits
    /// of an LCG have short periods.
    fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl<R: TileRng + ?Sized> TileRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_range(&mut self, max: u32) -> u32 {
        (**self).next_range(max)
    }
}

/// Value of a freshly spawned tile: 2 with probability 0.9, else 4
pub fn spawn_value<R: TileRng + ?Sized>(rng: &mut R) -> u32 {
    if rng.next_range(100) < FOUR_TILE_PERCENT {
        4
    } else {
        2
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current RNG state (restarting from it replays the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in [1, 2, 3, 81, 100] {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_spawn_value_distribution() {
        let mut rng = SimpleRng::new(2024);
        let mut fours = 0;
        for _ in 0..10_000 {
            match spawn_value(&mut rng) {
                4 => fours += 1,
                2 => {}
                other => panic!("unexpected spawn value {}", other),
            }
        }
        // 10% expected; allow generous slack.
        assert!((700..1300).contains(&fours), "fours = {}", fours);
    }
}
