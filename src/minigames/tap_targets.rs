// Tap Targets: five drifting bubbles, burst them all before the clock runs out.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const BUBBLES: usize = 5;
const RADIUS: f64 = 34.0;

struct Bubble {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    popped: bool,
}

struct TapTargets {
    w: f64,
    h: f64,
    bubbles: Vec<Bubble>,
    elapsed_ms: f64,
    running: bool,
    pending: Option<RoundOutcome>,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    let mut rng = Lcg::new(seed);
    let mut bubbles = Vec::with_capacity(BUBBLES);
    for _ in 0..BUBBLES {
        bubbles.push(Bubble {
            x: rng.range(RADIUS + 10.0, w - RADIUS - 10.0),
            y: rng.range(RADIUS + 80.0, h - RADIUS - 40.0),
            vx: rng.range(-60.0, 60.0),
            vy: rng.range(-60.0, 60.0),
            popped: false,
        });
    }
    Box::new(TapTargets {
        w,
        h,
        bubbles,
        elapsed_ms: 0.0,
        running: false,
        pending: None,
        resolved: false,
    })
}

impl Minigame for TapTargets {
    fn start(&mut self) {
        self.running = true;
    }

    fn advance(&mut self, dt_ms: f64) -> Option<RoundOutcome> {
        if !self.running || self.resolved {
            return None;
        }
        self.elapsed_ms += dt_ms;
        let dt = dt_ms / 1000.0;
        for b in self.bubbles.iter_mut().filter(|b| !b.popped) {
            b.x += b.vx * dt;
            b.y += b.vy * dt;
            if b.x < RADIUS || b.x > self.w - RADIUS {
                b.vx = -b.vx;
                b.x = b.x.clamp(RADIUS, self.w - RADIUS);
            }
            if b.y < RADIUS + 60.0 || b.y > self.h - RADIUS {
                b.vy = -b.vy;
                b.y = b.y.clamp(RADIUS + 60.0, self.h - RADIUS);
            }
        }
        if let Some(outcome) = self.pending.take() {
            self.resolved = true;
            return Some(outcome);
        }
        None
    }

    fn render(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#10203a");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        for b in self.bubbles.iter().filter(|b| !b.popped) {
            ctx.begin_path();
            ctx.arc(b.x, b.y, RADIUS, 0.0, std::f64::consts::TAU).ok();
            ctx.set_fill_style_str("rgba(120,200,255,0.85)");
            ctx.fill();
            ctx.set_stroke_style_str("#e8f6ff");
            ctx.set_line_width(3.0);
            ctx.stroke();
        }
    }

    fn pointer_down(&mut self, x: f64, y: f64) {
        if !self.running || self.resolved || self.pending.is_some() {
            return;
        }
        for b in self.bubbles.iter_mut().filter(|b| !b.popped) {
            if (b.x - x).hypot(b.y - y) <= RADIUS + 6.0 {
                b.popped = true;
                break;
            }
        }
        if self.bubbles.iter().all(|b| b.popped) {
            // Faster clears score higher.
            let bonus = ((6_000.0 - self.elapsed_ms) / 100.0).max(0.0);
            self.pending = Some(RoundOutcome::Success {
                raw_score: 40.0 + bonus,
            });
        }
    }

    fn time_up(&mut self) -> RoundOutcome {
        self.resolved = true;
        // Leftover bubbles mean the round is lost.
        self.pending.take().unwrap_or(RoundOutcome::Failure)
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
