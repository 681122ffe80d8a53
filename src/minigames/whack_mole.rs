// Whack Mole: one mole pops out of a 3x3 field at a time. Land four hits
// before the clock runs out; taps on empty holes cost score, not the round.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const GRID: usize = 3;
const GOAL: u32 = 4;
const POP_MS: f64 = 900.0;
const HOLE_R: f64 = 42.0;

struct WhackMole {
    w: f64,
    h: f64,
    rng: Lcg,
    mole: Option<usize>,
    pop_clock_ms: f64,
    hits: u32,
    whiffs: u32,
    running: bool,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    Box::new(WhackMole {
        w,
        h,
        rng: Lcg::new(seed),
        mole: None,
        pop_clock_ms: POP_MS, // pop immediately on the first frame
        hits: 0,
        whiffs: 0,
        running: false,
        resolved: false,
    })
}

impl WhackMole {
    fn hole_center(&self, idx: usize) -> (f64, f64) {
        let col = (idx % GRID) as f64;
        let row = (idx / GRID) as f64;
        let cw = self.w / GRID as f64;
        let ch = (self.h - 100.0) / GRID as f64;
        (cw * (col + 0.5), 100.0 + ch * (row + 0.5))
    }

    fn repop(&mut self) {
        let previous = self.mole;
        let mut idx = self.rng.roll(GRID * GRID);
        if Some(idx) == previous {
            idx = (idx + 1) % (GRID * GRID);
        }
        self.mole = Some(idx);
    }
}

impl Minigame for WhackMole {
    fn start(&mut self) {
        self.running = true;
    }

    fn advance(&mut self, dt_ms: f64) -> Option<RoundOutcome> {
        if !self.running || self.resolved {
            return None;
        }
        self.pop_clock_ms += dt_ms;
        if self.pop_clock_ms >= POP_MS {
            self.pop_clock_ms -= POP_MS;
            self.repop();
        }
        if self.hits >= GOAL {
            self.resolved = true;
            let raw = (40.0 + 15.0 * self.hits as f64 - 8.0 * self.whiffs as f64).max(15.0);
            return Some(RoundOutcome::Success { raw_score: raw });
        }
        None
    }

    fn render(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#243018");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        for i in 0..GRID * GRID {
            let (cx, cy) = self.hole_center(i);
            ctx.begin_path();
            ctx.arc(cx, cy, HOLE_R, 0.0, std::f64::consts::TAU).ok();
            ctx.set_fill_style_str("#141a0e");
            ctx.fill();
            if self.mole == Some(i) {
                ctx.begin_path();
                ctx.arc(cx, cy - 8.0, HOLE_R * 0.7, 0.0, std::f64::consts::TAU)
                    .ok();
                ctx.set_fill_style_str("#b08558");
                ctx.fill();
            }
        }
        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("22px 'Fira Code', monospace");
        ctx.set_text_align("center");
        ctx.fill_text(&format!("{}/{}", self.hits, GOAL), self.w / 2.0, 46.0)
            .ok();
    }

    fn pointer_down(&mut self, x: f64, y: f64) {
        if !self.running || self.resolved {
            return;
        }
        if let Some(idx) = self.mole {
            let (cx, cy) = self.hole_center(idx);
            if (cx - x).hypot(cy - y) <= HOLE_R + 8.0 {
                self.hits += 1;
                self.mole = None;
                return;
            }
        }
        self.whiffs += 1;
    }

    fn time_up(&mut self) -> RoundOutcome {
        self.resolved = true;
        // Quota not reached in time.
        RoundOutcome::Failure
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
