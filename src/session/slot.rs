//! Single-owner slot for the active minigame instance.
//!
//! At most one instance is live at a time, and the previous one is always
//! stopped synchronously before a new one starts. Keeping the slot as its
//! own type (instead of a bare `Option` on the browser state) makes that
//! ordering enforceable in one place and testable without a browser.

use crate::minigames::Minigame;

pub struct RoundSlot {
    active: Option<Box<dyn Minigame>>,
}

impl RoundSlot {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&dyn Minigame> {
        self.active.as_deref()
    }

    pub fn active_mut(&mut self) -> Option<&mut (dyn Minigame + 'static)> {
        self.active.as_deref_mut()
    }

    /// Install `game` and call its `start()`. Any previous occupant is
    /// stopped and released first, so `stop()` always precedes the next
    /// `start()`. Returns `true` if a stale occupant had to be evicted.
    pub fn deploy(&mut self, mut game: Box<dyn Minigame>) -> bool {
        let evicted = self.clear();
        game.start();
        self.active = Some(game);
        evicted
    }

    /// Stop and release the occupant, if any. Synchronous, exactly-once:
    /// after this returns the slot is empty. Returns `true` if there was
    /// one to stop.
    pub fn clear(&mut self) -> bool {
        if let Some(mut game) = self.active.take() {
            game.stop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minigames::RoundOutcome;
    use std::cell::RefCell;
    use std::rc::Rc;
    use web_sys::CanvasRenderingContext2d;

    type CallLog = Rc<RefCell<Vec<String>>>;

    /// Records its lifecycle calls into a shared log.
    struct Recorder {
        name: &'static str,
        log: CallLog,
    }

    impl Recorder {
        fn boxed(name: &'static str, log: &CallLog) -> Box<dyn Minigame> {
            Box::new(Recorder {
                name,
                log: log.clone(),
            })
        }

        fn note(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, what));
        }
    }

    impl Minigame for Recorder {
        fn start(&mut self) {
            self.note("start");
        }

        fn advance(&mut self, _dt_ms: f64) -> Option<RoundOutcome> {
            None
        }

        fn render(&self, _ctx: &CanvasRenderingContext2d) {}

        fn time_up(&mut self) -> RoundOutcome {
            RoundOutcome::Failure
        }

        fn stop(&mut self) {
            self.note("stop");
        }
    }

    #[test]
    fn deploy_then_clear_calls_start_then_stop() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let mut slot = RoundSlot::new();
        assert!(!slot.is_occupied());
        assert!(!slot.deploy(Recorder::boxed("a", &log)));
        assert!(slot.is_occupied());
        assert!(slot.clear());
        assert!(!slot.is_occupied());
        assert_eq!(*log.borrow(), ["a:start", "a:stop"]);
    }

    #[test]
    fn second_round_stops_the_previous_instance_before_starting() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let mut slot = RoundSlot::new();
        slot.deploy(Recorder::boxed("a", &log));
        slot.clear();
        slot.deploy(Recorder::boxed("b", &log));
        slot.clear();
        assert_eq!(
            *log.borrow(),
            ["a:start", "a:stop", "b:start", "b:stop"],
            "every start must be preceded by the previous stop"
        );
    }

    #[test]
    fn deploy_over_a_live_instance_evicts_it_stop_first() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let mut slot = RoundSlot::new();
        slot.deploy(Recorder::boxed("a", &log));
        // No clear in between: the slot itself must enforce the ordering.
        let evicted = slot.deploy(Recorder::boxed("b", &log));
        assert!(evicted, "a stale occupant was live");
        assert_eq!(*log.borrow(), ["a:start", "a:stop", "b:start"]);
    }

    #[test]
    fn abandon_clears_exactly_once() {
        let log: CallLog = Rc::new(RefCell::new(Vec::new()));
        let mut slot = RoundSlot::new();
        slot.deploy(Recorder::boxed("a", &log));
        assert!(slot.clear());
        assert!(!slot.clear(), "second clear finds an empty slot");
        assert_eq!(*log.borrow(), ["a:start", "a:stop"]);
    }
}
