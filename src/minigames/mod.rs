//! Minigame contract and catalog.
//!
//! Every minigame is a short self-contained simulation driven entirely by the
//! session orchestrator: the orchestrator owns the animation-frame loop and
//! calls [`Minigame::advance`] / [`Minigame::render`] once per frame, and
//! routes pointer events to the active instance only while its round is live.
//! A minigame reports its result by returning [`RoundOutcome`] from `advance`
//! (or from [`Minigame::time_up`] when the round clock runs out), which makes
//! the completion signal at-most-once by construction.
//!
//! The catalog is a static registry of factory functions; picking a game by
//! id never goes through a string-keyed branch.

use web_sys::CanvasRenderingContext2d;

mod balloon_pump;
mod dodge_rain;
mod falling_catch;
mod match_pair;
mod odd_one_out;
mod swipe_gate;
mod tap_targets;
mod whack_mole;

/// Terminal result of one round, reported exactly once per instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundOutcome {
    /// Won; `raw_score` is a unit-less performance number private to the
    /// minigame, meaningful only as input to the score engine.
    Success { raw_score: f64 },
    Failure,
}

/// Capability set every minigame variant implements.
///
/// Lifecycle per instance: built by its catalog factory, `start()` called
/// exactly once, then `advance`/`render` every frame until it returns an
/// outcome (or `time_up` forces one), then `stop()`. `stop()` must tolerate
/// being called redundantly (the orchestrator calls it defensively) and after
/// it an instance must not advance its simulation again.
pub trait Minigame {
    /// Begin the simulation. Called exactly once, right after the countdown.
    fn start(&mut self);

    /// Advance the simulation by `dt_ms` and report the outcome once a
    /// terminal condition is reached. Must return `None` forever after the
    /// first `Some` (instances guard this with an internal resolved flag).
    fn advance(&mut self, dt_ms: f64) -> Option<RoundOutcome>;

    /// Draw the current frame. The active minigame is the sole writer of the
    /// stage surface between `start()` and its completion signal.
    fn render(&self, ctx: &CanvasRenderingContext2d);

    /// Pointer/touch press in surface-local coordinates.
    fn pointer_down(&mut self, _x: f64, _y: f64) {}
    fn pointer_move(&mut self, _x: f64, _y: f64) {}
    fn pointer_up(&mut self, _x: f64, _y: f64) {}

    /// The round clock expired without the simulation resolving itself.
    /// Every game decides explicitly whether that is a win or a loss; there
    /// is deliberately no default.
    fn time_up(&mut self) -> RoundOutcome;

    /// Release everything `start()` acquired. Redundant calls are no-ops.
    fn stop(&mut self);
}

/// Identifier of a catalog entry. Discriminants index [`CATALOG`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MinigameId {
    TapTargets = 0,
    FallingCatch = 1,
    DodgeRain = 2,
    BalloonPump = 3,
    MatchPair = 4,
    WhackMole = 5,
    SwipeGate = 6,
    OddOneOut = 7,
}

impl MinigameId {
    pub const ALL: [MinigameId; 8] = [
        MinigameId::TapTargets,
        MinigameId::FallingCatch,
        MinigameId::DodgeRain,
        MinigameId::BalloonPump,
        MinigameId::MatchPair,
        MinigameId::WhackMole,
        MinigameId::SwipeGate,
        MinigameId::OddOneOut,
    ];
}

/// Builds a fresh instance for a stage of `w` x `h` pixels. The seed feeds
/// the minigame's internal [`crate::rng::Lcg`].
pub type MinigameFactory = fn(w: f64, h: f64, seed: u64) -> Box<dyn Minigame>;

/// Static per-entry metadata. Label and tagline are shown on the transition
/// screen only; `duration_ms` is the hard round clock enforced by the
/// orchestrator.
pub struct MinigameDesc {
    pub id: MinigameId,
    pub label: &'static str,
    pub tagline: &'static str,
    pub duration_ms: f64,
    pub factory: MinigameFactory,
}

/// The full immutable catalog, ordered by [`MinigameId`] discriminant.
pub static CATALOG: [MinigameDesc; 8] = [
    MinigameDesc {
        id: MinigameId::TapTargets,
        label: "TAP!",
        tagline: "Burst every bubble",
        duration_ms: 6_000.0,
        factory: tap_targets::build,
    },
    MinigameDesc {
        id: MinigameId::FallingCatch,
        label: "CATCH!",
        tagline: "Three snacks in the basket",
        duration_ms: 8_000.0,
        factory: falling_catch::build,
    },
    MinigameDesc {
        id: MinigameId::DodgeRain,
        label: "DODGE!",
        tagline: "Don't get hit",
        duration_ms: 7_000.0,
        factory: dodge_rain::build,
    },
    MinigameDesc {
        id: MinigameId::BalloonPump,
        label: "PUMP!",
        tagline: "Inflate into the band, don't pop",
        duration_ms: 6_000.0,
        factory: balloon_pump::build,
    },
    MinigameDesc {
        id: MinigameId::MatchPair,
        label: "MATCH!",
        tagline: "Tap the identical twins",
        duration_ms: 7_000.0,
        factory: match_pair::build,
    },
    MinigameDesc {
        id: MinigameId::WhackMole,
        label: "WHACK!",
        tagline: "Four moles, no mercy",
        duration_ms: 9_000.0,
        factory: whack_mole::build,
    },
    MinigameDesc {
        id: MinigameId::SwipeGate,
        label: "SWIPE!",
        tagline: "Follow the arrow",
        duration_ms: 5_000.0,
        factory: swipe_gate::build,
    },
    MinigameDesc {
        id: MinigameId::OddOneOut,
        label: "SPOT!",
        tagline: "One tile is off",
        duration_ms: 6_000.0,
        factory: odd_one_out::build,
    },
];

pub fn descriptor(id: MinigameId) -> &'static MinigameDesc {
    &CATALOG[id as usize]
}
