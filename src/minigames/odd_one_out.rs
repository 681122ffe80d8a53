// Odd One Out: a 4x4 field of tiles, one is tinted slightly off. Tap it.
// Any other tile loses, and the tint gap shrinks as the round ages.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const GRID: usize = 4;

struct OddOneOut {
    w: f64,
    h: f64,
    odd_idx: usize,
    base_hue: f64,
    elapsed_ms: f64,
    running: bool,
    pending: Option<RoundOutcome>,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    let mut rng = Lcg::new(seed);
    Box::new(OddOneOut {
        w,
        h,
        odd_idx: rng.roll(GRID * GRID),
        base_hue: rng.range(0.0, 360.0),
        elapsed_ms: 0.0,
        running: false,
        pending: None,
        resolved: false,
    })
}

impl OddOneOut {
    fn cell_rect(&self, idx: usize) -> (f64, f64, f64, f64) {
        let margin = 24.0;
        let top = 90.0;
        let cw = (self.w - margin * 2.0) / GRID as f64;
        let ch = (self.h - top - margin) / GRID as f64;
        let col = (idx % GRID) as f64;
        let row = (idx / GRID) as f64;
        (margin + col * cw, top + row * ch, cw, ch)
    }
}

impl Minigame for OddOneOut {
    fn start(&mut self) {
        self.running = true;
    }

    fn advance(&mut self, dt_ms: f64) -> Option<RoundOutcome> {
        if !self.running || self.resolved {
            return None;
        }
        self.elapsed_ms += dt_ms;
        if let Some(outcome) = self.pending.take() {
            self.resolved = true;
            return Some(outcome);
        }
        None
    }

    fn render(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#221d28");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        // The odd tile starts 26 lightness points apart and converges.
        let gap = (26.0 - self.elapsed_ms / 400.0).max(9.0);
        for i in 0..GRID * GRID {
            let (x, y, cw, ch) = self.cell_rect(i);
            let light = if i == self.odd_idx { 52.0 + gap } else { 52.0 };
            ctx.set_fill_style_str(&format!("hsl({:.0},65%,{:.0}%)", self.base_hue, light));
            ctx.fill_rect(x + 4.0, y + 4.0, cw - 8.0, ch - 8.0);
        }
    }

    fn pointer_down(&mut self, px: f64, py: f64) {
        if !self.running || self.resolved || self.pending.is_some() {
            return;
        }
        for i in 0..GRID * GRID {
            let (x, y, cw, ch) = self.cell_rect(i);
            if px >= x && px <= x + cw && py >= y && py <= y + ch {
                if i == self.odd_idx {
                    let bonus = ((6_000.0 - self.elapsed_ms) / 100.0).max(0.0);
                    self.pending = Some(RoundOutcome::Success {
                        raw_score: 35.0 + bonus,
                    });
                } else {
                    self.pending = Some(RoundOutcome::Failure);
                }
                return;
            }
        }
    }

    fn time_up(&mut self) -> RoundOutcome {
        self.resolved = true;
        self.pending.take().unwrap_or(RoundOutcome::Failure)
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
