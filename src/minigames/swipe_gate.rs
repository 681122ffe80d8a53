// Swipe Gate: a big arrow shows a direction; swipe that way, fast and far.
// A swipe along the wrong axis loses immediately, a timeout loses too.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const MIN_LEN: f64 = 80.0;

#[derive(Clone, Copy, PartialEq)]
enum Dir {
    Up,
    Down,
    Left,
    Right,
}

struct SwipeGate {
    w: f64,
    h: f64,
    target: Dir,
    press: Option<(f64, f64, f64)>, // x, y, elapsed_ms at press
    elapsed_ms: f64,
    running: bool,
    pending: Option<RoundOutcome>,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    let target = match Lcg::new(seed).roll(4) {
        0 => Dir::Up,
        1 => Dir::Down,
        2 => Dir::Left,
        _ => Dir::Right,
    };
    Box::new(SwipeGate {
        w,
        h,
        target,
        press: None,
        elapsed_ms: 0.0,
        running: false,
        pending: None,
        resolved: false,
    })
}

impl SwipeGate {
    fn classify(dx: f64, dy: f64) -> Option<Dir> {
        if dx.abs().max(dy.abs()) < MIN_LEN {
            return None; // too short to count as a swipe
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0.0 { Dir::Right } else { Dir::Left })
        } else {
            Some(if dy > 0.0 { Dir::Down } else { Dir::Up })
        }
    }
}

impl Minigame for SwipeGate {
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
        ctx.set_fill_style_str("#141e2b");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        let (cx, cy) = (self.w / 2.0, self.h / 2.0);
        let len = 90.0;
        let (tx, ty) = match self.target {
            Dir::Up => (0.0, -len),
            Dir::Down => (0.0, len),
            Dir::Left => (-len, 0.0),
            Dir::Right => (len, 0.0),
        };
        ctx.set_stroke_style_str("#ffd166");
        ctx.set_line_width(14.0);
        ctx.begin_path();
        ctx.move_to(cx - tx, cy - ty);
        ctx.line_to(cx + tx, cy + ty);
        ctx.stroke();
        // Arrowhead
        let (nx, ny) = (tx / len, ty / len);
        ctx.begin_path();
        ctx.move_to(cx + tx, cy + ty);
        ctx.line_to(cx + tx - nx * 34.0 - ny * 24.0, cy + ty - ny * 34.0 + nx * 24.0);
        ctx.move_to(cx + tx, cy + ty);
        ctx.line_to(cx + tx - nx * 34.0 + ny * 24.0, cy + ty - ny * 34.0 - nx * 24.0);
        ctx.stroke();
    }

    fn pointer_down(&mut self, x: f64, y: f64) {
        if self.running && !self.resolved {
            self.press = Some((x, y, self.elapsed_ms));
        }
    }

    fn pointer_up(&mut self, x: f64, y: f64) {
        if !self.running || self.resolved || self.pending.is_some() {
            return;
        }
        let Some((sx, sy, t0)) = self.press.take() else {
            return;
        };
        let Some(dir) = Self::classify(x - sx, y - sy) else {
            return; // a tap, not a swipe; keep waiting
        };
        if dir == self.target {
            let len = (x - sx).hypot(y - sy);
            let swipe_ms = (self.elapsed_ms - t0).max(16.0);
            // Faster and longer swipes pay more, capped to keep rewards sane.
            let raw = (len / swipe_ms * 120.0 + len / 4.0).min(150.0);
            self.pending = Some(RoundOutcome::Success {
                raw_score: raw.max(25.0),
            });
        } else {
            self.pending = Some(RoundOutcome::Failure);
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
