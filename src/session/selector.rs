//! Next-minigame selection: sampling without replacement per cycle.
//!
//! Each cycle covers the whole catalog exactly once; cycle boundaries are
//! silent. When a cycle resets, the immediately previous pick is excluded
//! from the fresh candidate list so two consecutive calls never return the
//! same id (unless the catalog has a single entry).

use crate::minigames::MinigameId;

pub struct CatalogSelector {
    ids: Vec<MinigameId>,
    played: Vec<MinigameId>,
    last: Option<MinigameId>,
}

impl CatalogSelector {
    /// Panics when `ids` is empty: a selector with nothing to select is a
    /// construction bug, caught here rather than on the first `next`.
    pub fn new(ids: &[MinigameId]) -> Self {
        assert!(!ids.is_empty(), "catalog must have at least one entry");
        Self {
            ids: ids.to_vec(),
            played: Vec::with_capacity(ids.len()),
            last: None,
        }
    }

    /// Pick the next id. `roll` maps a candidate count to an index in
    /// `0..count`; the caller supplies the randomness so tests can be
    /// deterministic.
    pub fn next<F: FnOnce(usize) -> usize>(&mut self, roll: F) -> MinigameId {
        if self.played.len() >= self.ids.len() {
            self.played.clear();
        }
        let mut candidates: Vec<MinigameId> = self
            .ids
            .iter()
            .copied()
            .filter(|id| !self.played.contains(id))
            .collect();
        // Only relevant on the first pick of a fresh cycle, where the full
        // catalog is back on the table including the id just played.
        if candidates.len() > 1 {
            if let Some(last) = self.last {
                candidates.retain(|&id| id != last);
            }
        }
        let idx = roll(candidates.len()) % candidates.len().max(1);
        let chosen = candidates[idx];
        self.played.push(chosen);
        self.last = Some(chosen);
        chosen
    }

    /// Forget the current cycle (session reset).
    pub fn reset(&mut self) {
        self.played.clear();
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Lcg;
    use std::collections::HashSet;

    fn catalog3() -> [MinigameId; 3] {
        [
            MinigameId::TapTargets,
            MinigameId::DodgeRain,
            MinigameId::SwipeGate,
        ]
    }

    #[test]
    fn n_calls_cover_the_catalog_exactly_once() {
        let ids = MinigameId::ALL;
        let mut sel = CatalogSelector::new(&ids);
        let mut rng = Lcg::new(99);
        for _cycle in 0..5 {
            let drawn: HashSet<MinigameId> =
                (0..ids.len()).map(|_| sel.next(|n| rng.roll(n))).collect();
            assert_eq!(drawn.len(), ids.len(), "cycle must be a permutation");
        }
    }

    #[test]
    fn no_two_consecutive_calls_repeat() {
        let ids = MinigameId::ALL;
        let mut sel = CatalogSelector::new(&ids);
        let mut rng = Lcg::new(7);
        let mut prev = None;
        for _ in 0..200 {
            let id = sel.next(|n| rng.roll(n));
            assert_ne!(Some(id), prev, "immediate repeat across cycle boundary");
            prev = Some(id);
        }
    }

    #[test]
    fn three_game_catalog_permutes_then_may_repeat() {
        let ids = catalog3();
        let mut sel = CatalogSelector::new(&ids);
        let mut rng = Lcg::new(3);
        let first: Vec<MinigameId> = (0..3).map(|_| sel.next(|n| rng.roll(n))).collect();
        let drawn: HashSet<_> = first.iter().copied().collect();
        assert_eq!(drawn.len(), 3);
        // Fourth call starts a new cycle; anything but the third pick is legal.
        let fourth = sel.next(|n| rng.roll(n));
        assert_ne!(fourth, first[2]);
        assert!(ids.contains(&fourth));
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn empty_catalog_is_rejected_at_construction() {
        CatalogSelector::new(&[]);
    }

    #[test]
    fn single_entry_catalog_repeats() {
        let ids = [MinigameId::TapTargets];
        let mut sel = CatalogSelector::new(&ids);
        assert_eq!(sel.next(|_| 0), MinigameId::TapTargets);
        assert_eq!(sel.next(|_| 0), MinigameId::TapTargets);
    }

    #[test]
    fn reset_forgets_cycle_state() {
        let ids = catalog3();
        let mut sel = CatalogSelector::new(&ids);
        let mut rng = Lcg::new(11);
        sel.next(|n| rng.roll(n));
        sel.next(|n| rng.roll(n));
        sel.reset();
        let drawn: HashSet<MinigameId> =
            (0..3).map(|_| sel.next(|n| rng.roll(n))).collect();
        assert_eq!(drawn.len(), 3, "fresh cycle after reset");
    }
}
