// Falling Catch: slide the basket with the pointer, land three snacks in it.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const GOAL: u32 = 3;
const BASKET_W: f64 = 96.0;
const BASKET_H: f64 = 26.0;
const SPAWN_PERIOD_MS: f64 = 1_000.0;

struct Snack {
    x: f64,
    y: f64,
    vy: f64,
}

struct FallingCatch {
    w: f64,
    h: f64,
    rng: Lcg,
    basket_x: f64,
    snacks: Vec<Snack>,
    caught: u32,
    missed: u32,
    spawn_clock_ms: f64,
    running: bool,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    Box::new(FallingCatch {
        w,
        h,
        rng: Lcg::new(seed),
        basket_x: w / 2.0,
        snacks: Vec::new(),
        caught: 0,
        missed: 0,
        spawn_clock_ms: SPAWN_PERIOD_MS * 0.5,
        running: false,
        resolved: false,
    })
}

impl FallingCatch {
    fn basket_top(&self) -> f64 {
        self.h - 70.0
    }
}

impl Minigame for FallingCatch {
    fn start(&mut self) {
        self.running = true;
    }

    fn advance(&mut self, dt_ms: f64) -> Option<RoundOutcome> {
        if !self.running || self.resolved {
            return None;
        }
        self.spawn_clock_ms += dt_ms;
        if self.spawn_clock_ms >= SPAWN_PERIOD_MS {
            self.spawn_clock_ms -= SPAWN_PERIOD_MS;
            let x = self.rng.range(30.0, self.w - 30.0);
            let vy = self.rng.range(240.0, 340.0);
            self.snacks.push(Snack { x, y: -20.0, vy });
        }
        let dt = dt_ms / 1000.0;
        let top = self.basket_top();
        let (bx, bw) = (self.basket_x, BASKET_W);
        let mut caught = self.caught;
        let mut missed = self.missed;
        self.snacks.retain_mut(|s| {
            s.y += s.vy * dt;
            if s.y >= top && s.y <= top + BASKET_H && (s.x - bx).abs() <= bw / 2.0 {
                caught += 1;
                return false;
            }
            if s.y > top + BASKET_H {
                missed += 1;
                return false;
            }
            true
        });
        self.caught = caught;
        self.missed = missed;
        if self.caught >= GOAL {
            self.resolved = true;
            let raw = (75.0 - 15.0 * self.missed as f64).max(20.0);
            return Some(RoundOutcome::Success { raw_score: raw });
        }
        None
    }

    fn render(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#1c2a1c");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        for s in &self.snacks {
            ctx.begin_path();
            ctx.arc(s.x, s.y, 12.0, 0.0, std::f64::consts::TAU).ok();
            ctx.set_fill_style_str("#ffd166");
            ctx.fill();
        }
        let top = self.basket_top();
        ctx.set_fill_style_str("#a0663a");
        ctx.fill_rect(self.basket_x - BASKET_W / 2.0, top, BASKET_W, BASKET_H);
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("22px 'Fira Code', monospace");
        ctx.set_text_align("center");
        ctx.fill_text(
            &format!("{}/{}", self.caught, GOAL),
            self.w / 2.0,
            40.0,
        )
        .ok();
    }

    fn pointer_down(&mut self, x: f64, _y: f64) {
        self.pointer_move(x, _y);
    }

    fn pointer_move(&mut self, x: f64, _y: f64) {
        if self.running && !self.resolved {
            self.basket_x = x.clamp(BASKET_W / 2.0, self.w - BASKET_W / 2.0);
        }
    }

    fn time_up(&mut self) -> RoundOutcome {
        self.resolved = true;
        // Not enough catches in time.
        RoundOutcome::Failure
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
