//! Small deterministic random source shared by the selector and the
//! minigames. A linear congruential generator is plenty for party-game
//! shuffling (not crypto secure); tests seed it explicitly, the browser
//! layer seeds it from `performance.now()`.

#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

/// OS/browser entropy for the session seed (`rng` feature). `None` when the
/// entropy source is unavailable; callers fall back to a clock-derived seed.
#[cfg(feature = "rng")]
pub fn entropy_seed() -> Option<u64> {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).ok()?;
    Some(u64::from_le_bytes(buf))
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        // Avoid the all-zero fixed point of the multiplier-only path.
        Self {
            state: seed ^ 0x9e37_79b9_7f4a_7c15,
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        // High bits have the better statistical quality.
        (self.state >> 32) as u32
    }

    /// Uniform-ish index in `0..len`. Returns 0 for an empty range.
    pub fn roll(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32() as usize % len
    }

    /// Uniform-ish float in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let t = self.next_u32() as f64 / (u32::MAX as f64 + 1.0);
        lo + (hi - lo) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_stays_in_range() {
        let mut rng = Lcg::new(7);
        for _ in 0..1000 {
            assert!(rng.roll(8) < 8);
        }
        assert_eq!(rng.roll(0), 0);
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = Lcg::new(42);
        for _ in 0..1000 {
            let v = rng.range(3.0, 9.0);
            assert!((3.0..9.0).contains(&v), "out of range: {v}");
        }
    }

    #[cfg(feature = "rng")]
    #[test]
    fn entropy_seed_yields_distinct_seeds() {
        let a = entropy_seed().expect("entropy source available on the host");
        let b = entropy_seed().expect("entropy source available on the host");
        assert_ne!(a, b, "two 64-bit draws colliding is not plausible");
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(123);
        let mut b = Lcg::new(123);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
