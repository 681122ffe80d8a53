// Balloon Pump: every tap inflates the balloon, air leaks back out slowly.
// Be inside the target band when the clock runs out; past the burst radius
// the balloon pops and the round is lost on the spot.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const START_R: f64 = 26.0;
const PUMP_R: f64 = 9.0;
const LEAK_PER_S: f64 = 4.0;
const BURST_R: f64 = 112.0;

struct BalloonPump {
    w: f64,
    h: f64,
    radius: f64,
    band_lo: f64,
    band_hi: f64,
    burst: bool,
    running: bool,
    pending: Option<RoundOutcome>,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    // Shift the band a little per round so muscle memory doesn't trivialize it.
    let lo = Lcg::new(seed).range(62.0, 78.0);
    Box::new(BalloonPump {
        w,
        h,
        radius: START_R,
        band_lo: lo,
        band_hi: lo + 28.0,
        burst: false,
        running: false,
        pending: None,
        resolved: false,
    })
}

impl Minigame for BalloonPump {
    fn start(&mut self) {
        self.running = true;
    }

    fn advance(&mut self, dt_ms: f64) -> Option<RoundOutcome> {
        if !self.running || self.resolved {
            return None;
        }
        if !self.burst {
            self.radius = (self.radius - LEAK_PER_S * dt_ms / 1000.0).max(START_R);
        }
        if let Some(outcome) = self.pending.take() {
            self.resolved = true;
            return Some(outcome);
        }
        None
    }

    fn render(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#2a1c2e");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        let (cx, cy) = (self.w / 2.0, self.h / 2.0);
        // Target band ring
        ctx.set_stroke_style_str("rgba(140,255,170,0.35)");
        ctx.set_line_width(self.band_hi - self.band_lo);
        ctx.begin_path();
        ctx.arc(
            cx,
            cy,
            (self.band_lo + self.band_hi) / 2.0,
            0.0,
            std::f64::consts::TAU,
        )
        .ok();
        ctx.stroke();
        // Balloon
        ctx.begin_path();
        ctx.arc(cx, cy, self.radius, 0.0, std::f64::consts::TAU).ok();
        ctx.set_fill_style_str(if self.burst { "#663333" } else { "#ff6b8a" });
        ctx.fill();
        if self.burst {
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("28px 'Fira Code', monospace");
            ctx.set_text_align("center");
            ctx.fill_text("POP!", cx, cy).ok();
        }
    }

    fn pointer_down(&mut self, _x: f64, _y: f64) {
        if !self.running || self.resolved || self.burst || self.pending.is_some() {
            return;
        }
        self.radius += PUMP_R;
        if self.radius >= BURST_R {
            self.burst = true;
            self.pending = Some(RoundOutcome::Failure);
        }
    }

    fn time_up(&mut self) -> RoundOutcome {
        self.resolved = true;
        if let Some(outcome) = self.pending.take() {
            return outcome;
        }
        if self.burst {
            return RoundOutcome::Failure;
        }
        // Judged at the bell: inside the band wins, closer to its middle pays more.
        if self.radius >= self.band_lo && self.radius <= self.band_hi {
            let mid = (self.band_lo + self.band_hi) / 2.0;
            let raw = (100.0 - (self.radius - mid).abs() * 3.0).max(15.0);
            RoundOutcome::Success { raw_score: raw }
        } else {
            RoundOutcome::Failure
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
