//! Score engine and lives tracker. Both are deliberately pure so every
//! scoring rule is pinned by native tests.

/// Convert a minigame's raw performance number into the session score delta.
///
/// `base = max(10, round(raw))`, `multiplier = 1 + rounds_completed * 0.25`,
/// `reward = round(base * multiplier)`. Rounding is half-away-from-zero
/// (`f64::round`), so e.g. `reward(8, 1) == round(10 * 1.25) == 13`.
pub fn reward(raw_score: f64, rounds_completed: u32) -> u64 {
    let base = raw_score.round().max(10.0);
    let multiplier = 1.0 + rounds_completed as f64 * 0.25;
    (base * multiplier).round() as u64
}

/// Bounded failure budget. Decrements saturate at zero; zero is terminal
/// until an explicit reset.
#[derive(Clone, Copy, Debug)]
pub struct Lives {
    value: u32,
    max: u32,
}

impl Lives {
    pub fn new(max: u32) -> Self {
        Self { value: max, max }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.value = self.max;
    }

    pub fn is_exhausted(&self) -> bool {
        self.value == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_floor_applies_to_tiny_raw_scores() {
        // base = max(10, 0), multiplier = 1
        assert_eq!(reward(0.0, 0), 10);
        assert_eq!(reward(-5.0, 0), 10);
        assert_eq!(reward(9.4, 0), 10);
    }

    #[test]
    fn reward_rounding_convention_is_half_away_from_zero() {
        // base = max(10, 8) = 10, multiplier = 1.25 -> 12.5 rounds up
        assert_eq!(reward(8.0, 1), 13);
        assert_eq!(reward(50.0, 0), 50);
        assert_eq!(reward(50.0, 2), 75);
    }

    #[test]
    fn reward_is_monotone_in_raw_score() {
        for k in 0..6 {
            let mut prev = 0;
            for raw in 0..200 {
                let r = reward(raw as f64, k);
                assert!(r >= prev, "reward regressed at raw={raw} k={k}");
                prev = r;
            }
        }
    }

    #[test]
    fn reward_is_monotone_in_rounds_completed() {
        for raw in [10.0, 25.0, 100.0] {
            let mut prev = 0;
            for k in 0..20 {
                let r = reward(raw, k);
                assert!(r >= prev, "reward regressed at raw={raw} k={k}");
                prev = r;
            }
        }
    }

    #[test]
    fn lives_saturate_at_zero() {
        let mut lives = Lives::new(1);
        lives.decrement();
        assert_eq!(lives.value(), 0);
        assert!(lives.is_exhausted());
        lives.decrement();
        assert_eq!(lives.value(), 0, "decrement must not go negative");
    }

    #[test]
    fn lives_reset_restores_max() {
        let mut lives = Lives::new(4);
        lives.decrement();
        lives.decrement();
        lives.reset();
        assert_eq!(lives.value(), 4);
        assert!(!lives.is_exhausted());
    }
}
