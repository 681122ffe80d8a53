// Match Pair: six tiles, exactly two show the same glyph. Tap both twins to
// win; tapping any other tile loses immediately.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const GLYPHS: [&str; 8] = ["★", "●", "▲", "◆", "♠", "☾", "✚", "♥"];
const COLS: usize = 2;
const ROWS: usize = 3;

struct Tile {
    glyph: &'static str,
    picked: bool,
}

struct MatchPair {
    w: f64,
    h: f64,
    tiles: Vec<Tile>,
    pair_glyph: &'static str,
    elapsed_ms: f64,
    running: bool,
    pending: Option<RoundOutcome>,
    resolved: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    let mut rng = Lcg::new(seed);
    // Pick the twin glyph plus four distinct decoys, then shuffle positions.
    let mut order: Vec<usize> = (0..GLYPHS.len()).collect();
    for i in (1..order.len()).rev() {
        order.swap(i, rng.roll(i + 1));
    }
    let pair_glyph = GLYPHS[order[0]];
    let mut glyphs = vec![pair_glyph, pair_glyph];
    glyphs.extend(order[1..5].iter().map(|&i| GLYPHS[i]));
    for i in (1..glyphs.len()).rev() {
        glyphs.swap(i, rng.roll(i + 1));
    }
    let tiles = glyphs
        .into_iter()
        .map(|glyph| Tile {
            glyph,
            picked: false,
        })
        .collect();
    Box::new(MatchPair {
        w,
        h,
        tiles,
        pair_glyph,
        elapsed_ms: 0.0,
        running: false,
        pending: None,
        resolved: false,
    })
}

impl MatchPair {
    fn cell_rect(&self, idx: usize) -> (f64, f64, f64, f64) {
        let margin = 30.0;
        let top = 90.0;
        let cw = (self.w - margin * 2.0) / COLS as f64;
        let ch = (self.h - top - margin) / ROWS as f64;
        let col = idx % COLS;
        let row = idx / COLS;
        (
            margin + col as f64 * cw,
            top + row as f64 * ch,
            cw,
            ch,
        )
    }
}

impl Minigame for MatchPair {
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
        ctx.set_fill_style_str("#1a2430");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        ctx.set_font("52px 'Fira Code', monospace");
        ctx.set_text_align("center");
        for (i, t) in self.tiles.iter().enumerate() {
            let (x, y, cw, ch) = self.cell_rect(i);
            ctx.set_fill_style_str(if t.picked { "#3f6f4f" } else { "#2c3a4a" });
            ctx.fill_rect(x + 6.0, y + 6.0, cw - 12.0, ch - 12.0);
            ctx.set_fill_style_str("#f0f4ff");
            ctx.fill_text(t.glyph, x + cw / 2.0, y + ch / 2.0 + 18.0).ok();
        }
    }

    fn pointer_down(&mut self, px: f64, py: f64) {
        if !self.running || self.resolved || self.pending.is_some() {
            return;
        }
        for i in 0..self.tiles.len() {
            let (x, y, cw, ch) = self.cell_rect(i);
            if px < x || px > x + cw || py < y || py > y + ch {
                continue;
            }
            if self.tiles[i].picked {
                return;
            }
            if self.tiles[i].glyph != self.pair_glyph {
                self.pending = Some(RoundOutcome::Failure);
                return;
            }
            self.tiles[i].picked = true;
            if self.tiles.iter().filter(|t| t.picked).count() == 2 {
                let bonus = ((7_000.0 - self.elapsed_ms) / 120.0).max(0.0);
                self.pending = Some(RoundOutcome::Success {
                    raw_score: 50.0 + bonus,
                });
            }
            return;
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
