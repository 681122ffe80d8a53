//! Pure session state machine.
//!
//! Everything timing- and browser-related lives in the parent module; this
//! one only encodes the screens and the legal transitions between them:
//!
//! `Idle -> Transitioning -> Playing -> Resolving -> Transitioning -> ...`
//! with `Playing -> Exhausted` once the last life is spent and any state
//! `-> Idle` as the abandon path. Illegal operations (e.g. `next_round`
//! while Exhausted) are rejected by returning `None` instead of panicking;
//! a crashed orchestrator would end the whole play session.

use super::score::{self, Lives};
use super::selector::CatalogSelector;
use crate::minigames::MinigameId;

pub const MAX_LIVES: u32 = 4;
pub const COUNTDOWN_START: u32 = 3;

/// Which screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
    Playing,
    Resolving,
    Exhausted,
}

/// One countdown step as observed by the timer callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownEvent {
    /// An intermediate count (2, 1).
    Tick(u32),
    /// Count reached zero; the round starts now.
    Final,
}

/// What a finished round did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundEnd {
    pub success: bool,
    pub reward: u64,
    pub lives_left: u32,
    pub exhausted: bool,
}

pub struct SessionCore {
    phase: Phase,
    total_score: u64,
    rounds_completed: u32,
    lives: Lives,
    last_reward: u64,
    selector: CatalogSelector,
    current: Option<MinigameId>,
    countdown: u32,
}

impl SessionCore {
    pub fn new(catalog: &[MinigameId]) -> Self {
        Self {
            phase: Phase::Idle,
            total_score: 0,
            rounds_completed: 0,
            lives: Lives::new(MAX_LIVES),
            last_reward: 0,
            selector: CatalogSelector::new(catalog),
            current: None,
            countdown: COUNTDOWN_START,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }

    pub fn lives(&self) -> &Lives {
        &self.lives
    }

    pub fn last_reward(&self) -> u64 {
        self.last_reward
    }

    pub fn current_game(&self) -> Option<MinigameId> {
        self.current
    }

    /// Count currently shown on the transition screen.
    pub fn countdown_display(&self) -> u32 {
        self.countdown
    }

    /// Begin a fresh session from the start screen: resets score, rounds and
    /// lives, then selects the first minigame and enters the countdown.
    /// Rejected outside `Idle`.
    pub fn start_run<F: FnOnce(usize) -> usize>(&mut self, roll: F) -> Option<MinigameId> {
        if self.phase != Phase::Idle {
            return None;
        }
        self.total_score = 0;
        self.rounds_completed = 0;
        self.last_reward = 0;
        self.lives.reset();
        self.selector.reset();
        Some(self.enter_transition(roll))
    }

    /// Advance from the result screen into the next round's countdown.
    /// Rejected outside `Resolving` (in particular while `Exhausted`).
    pub fn next_round<F: FnOnce(usize) -> usize>(&mut self, roll: F) -> Option<MinigameId> {
        if self.phase != Phase::Resolving {
            return None;
        }
        Some(self.enter_transition(roll))
    }

    fn enter_transition<F: FnOnce(usize) -> usize>(&mut self, roll: F) -> MinigameId {
        let id = self.selector.next(roll);
        self.current = Some(id);
        self.countdown = COUNTDOWN_START;
        self.phase = Phase::Transitioning;
        id
    }

    /// One firing of the countdown timer. Emits `Tick` for intermediate
    /// counts and `Final` when the count hits zero, at which point the phase
    /// flips to `Playing` and the orchestrator must hand the stage to the
    /// chosen minigame. Stray firings outside `Transitioning` (a timer that
    /// lost the cancellation race) are ignored.
    pub fn countdown_step(&mut self) -> Option<CountdownEvent> {
        if self.phase != Phase::Transitioning {
            return None;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.phase = Phase::Playing;
            Some(CountdownEvent::Final)
        } else {
            Some(CountdownEvent::Tick(self.countdown))
        }
    }

    /// Resolve the active round. Success credits `score::reward` and bumps
    /// the round streak; failure burns a life, and the session freezes in
    /// `Exhausted` when the last one goes. Rejected outside `Playing`, which
    /// also shields against a minigame signalling completion twice.
    pub fn end_round(&mut self, success: bool, raw_score: f64) -> Option<RoundEnd> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.current = None;
        if success {
            let reward = score::reward(raw_score, self.rounds_completed);
            self.total_score += reward;
            self.rounds_completed += 1;
            self.last_reward = reward;
            self.phase = Phase::Resolving;
            Some(RoundEnd {
                success: true,
                reward,
                lives_left: self.lives.value(),
                exhausted: false,
            })
        } else {
            self.lives.decrement();
            self.last_reward = 0;
            let exhausted = self.lives.is_exhausted();
            self.phase = if exhausted {
                Phase::Exhausted
            } else {
                Phase::Resolving
            };
            Some(RoundEnd {
                success: false,
                reward: 0,
                lives_left: self.lives.value(),
                exhausted,
            })
        }
    }

    /// Abandon path: legal from every state. Clears the session back to the
    /// start screen. The caller is responsible for tearing down the active
    /// minigame instance and cancelling any running countdown timer first.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.total_score = 0;
        self.rounds_completed = 0;
        self.last_reward = 0;
        self.lives.reset();
        self.selector.reset();
        self.current = None;
        self.countdown = COUNTDOWN_START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> SessionCore {
        SessionCore::new(&MinigameId::ALL)
    }

    fn run_countdown(core: &mut SessionCore) {
        // 3 -> Tick(2) -> Tick(1) -> Final
        assert_eq!(core.countdown_step(), Some(CountdownEvent::Tick(2)));
        assert_eq!(core.countdown_step(), Some(CountdownEvent::Tick(1)));
        assert_eq!(core.countdown_step(), Some(CountdownEvent::Final));
        assert_eq!(core.phase(), Phase::Playing);
    }

    #[test]
    fn start_run_resets_session_and_enters_countdown() {
        let mut core = core();
        let id = core.start_run(|_| 0);
        assert!(id.is_some());
        assert_eq!(core.phase(), Phase::Transitioning);
        assert_eq!(core.countdown_display(), COUNTDOWN_START);
        assert_eq!(core.lives().value(), MAX_LIVES);
        assert_eq!(core.total_score(), 0);
        assert_eq!(core.current_game(), id);
    }

    #[test]
    fn start_run_rejected_outside_idle() {
        let mut core = core();
        core.start_run(|_| 0);
        assert!(core.start_run(|_| 0).is_none(), "already transitioning");
    }

    #[test]
    fn countdown_steps_fire_in_decreasing_order_then_final() {
        let mut core = core();
        core.start_run(|_| 0);
        run_countdown(&mut core);
        // A stray timer firing after the transition is ignored.
        assert_eq!(core.countdown_step(), None);
    }

    #[test]
    fn scenario_a_first_win_credits_unmultiplied_reward() {
        let mut core = core();
        core.start_run(|_| 0);
        run_countdown(&mut core);
        let end = core.end_round(true, 50.0).unwrap();
        assert_eq!(end.reward, 50);
        assert_eq!(core.total_score(), 50);
        assert_eq!(core.rounds_completed(), 1);
        assert_eq!(core.lives().value(), 4);
        assert_eq!(core.phase(), Phase::Resolving);
    }

    #[test]
    fn scenario_b_second_win_applies_streak_multiplier() {
        let mut core = core();
        core.start_run(|_| 0);
        run_countdown(&mut core);
        core.end_round(true, 50.0).unwrap();
        core.next_round(|_| 0).unwrap();
        run_countdown(&mut core);
        // base = max(10, 8) = 10, multiplier = 1.25, round-half-away -> 13
        let end = core.end_round(true, 8.0).unwrap();
        assert_eq!(end.reward, 13);
        assert_eq!(core.total_score(), 63);
        assert_eq!(core.rounds_completed(), 2);
    }

    #[test]
    fn scenario_c_last_life_routes_to_exhausted() {
        let mut core = core();
        core.start_run(|_| 0);
        // Burn three lives.
        for _ in 0..3 {
            run_countdown(&mut core);
            let end = core.end_round(false, 0.0).unwrap();
            assert!(!end.exhausted);
            core.next_round(|_| 0).unwrap();
        }
        assert_eq!(core.lives().value(), 1);
        run_countdown(&mut core);
        let end = core.end_round(false, 0.0).unwrap();
        assert!(end.exhausted);
        assert_eq!(end.lives_left, 0);
        assert_eq!(core.phase(), Phase::Exhausted);
        // Exhausted is terminal: no next round until an explicit reset.
        assert!(core.next_round(|_| 0).is_none());
        assert!(core.start_run(|_| 0).is_none());
        core.reset();
        assert_eq!(core.phase(), Phase::Idle);
        assert!(core.start_run(|_| 0).is_some());
    }

    #[test]
    fn failure_keeps_score_and_zeroes_last_reward() {
        let mut core = core();
        core.start_run(|_| 0);
        run_countdown(&mut core);
        core.end_round(true, 100.0).unwrap();
        core.next_round(|_| 0).unwrap();
        run_countdown(&mut core);
        let end = core.end_round(false, 999.0).unwrap();
        assert_eq!(end.reward, 0);
        assert_eq!(core.last_reward(), 0);
        assert_eq!(core.total_score(), 100, "score survives a failed round");
        assert_eq!(core.lives().value(), MAX_LIVES - 1);
    }

    #[test]
    fn end_round_rejected_when_no_round_is_active() {
        let mut core = core();
        assert!(core.end_round(true, 10.0).is_none());
        core.start_run(|_| 0);
        // Still counting down, no active round yet.
        assert!(core.end_round(true, 10.0).is_none());
        run_countdown(&mut core);
        assert!(core.end_round(true, 10.0).is_some());
        // A second completion signal for the same round is ignored.
        assert!(core.end_round(true, 10.0).is_none());
    }

    #[test]
    fn reset_from_mid_countdown_returns_to_idle() {
        let mut core = core();
        core.start_run(|_| 0);
        core.countdown_step();
        core.reset();
        assert_eq!(core.phase(), Phase::Idle);
        assert_eq!(core.current_game(), None);
        // The cancelled countdown produces no further events.
        assert_eq!(core.countdown_step(), None);
    }

    #[test]
    fn rounds_use_every_catalog_entry_before_repeating() {
        use std::collections::HashSet;
        let mut core = core();
        let mut seen = HashSet::new();
        seen.insert(core.start_run(|_| 0).unwrap());
        for _ in 1..MinigameId::ALL.len() {
            run_countdown(&mut core);
            core.end_round(true, 20.0).unwrap();
            seen.insert(core.next_round(|_| 0).unwrap());
        }
        assert_eq!(seen.len(), MinigameId::ALL.len());
    }
}
