// Dodge Rain: keep the runner out from under the falling blocks until the
// clock runs out. Surviving is the win; near misses pad the score.
use super::{Minigame, RoundOutcome};
use crate::rng::Lcg;
use web_sys::CanvasRenderingContext2d;

const PLAYER_R: f64 = 18.0;
const BLOCK: f64 = 34.0;
const SPAWN_PERIOD_MS: f64 = 650.0;

struct Block {
    x: f64,
    y: f64,
    vy: f64,
    grazed: bool,
}

struct DodgeRain {
    w: f64,
    h: f64,
    rng: Lcg,
    player_x: f64,
    blocks: Vec<Block>,
    near_misses: u32,
    spawn_clock_ms: f64,
    running: bool,
    resolved: bool,
    hit: bool,
}

pub fn build(w: f64, h: f64, seed: u64) -> Box<dyn Minigame> {
    Box::new(DodgeRain {
        w,
        h,
        rng: Lcg::new(seed),
        player_x: w / 2.0,
        blocks: Vec::new(),
        near_misses: 0,
        spawn_clock_ms: 0.0,
        running: false,
        resolved: false,
        hit: false,
    })
}

impl DodgeRain {
    fn player_y(&self) -> f64 {
        self.h - 80.0
    }
}

impl Minigame for DodgeRain {
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
            let x = self.rng.range(BLOCK / 2.0, self.w - BLOCK / 2.0);
            let vy = self.rng.range(280.0, 420.0);
            self.blocks.push(Block {
                x,
                y: -BLOCK,
                vy,
                grazed: false,
            });
        }
        let dt = dt_ms / 1000.0;
        let (px, py) = (self.player_x, self.player_y());
        let mut hit = false;
        let mut near = 0;
        for b in self.blocks.iter_mut() {
            b.y += b.vy * dt;
            let dx = (b.x - px).abs();
            let dy = (b.y - py).abs();
            if dx < BLOCK / 2.0 + PLAYER_R && dy < BLOCK / 2.0 + PLAYER_R {
                hit = true;
            } else if !b.grazed && dx < BLOCK / 2.0 + PLAYER_R + 40.0 && dy < BLOCK {
                b.grazed = true;
                near += 1;
            }
        }
        self.near_misses += near;
        let h = self.h;
        self.blocks.retain(|b| b.y < h + BLOCK);
        if hit {
            self.hit = true;
            self.resolved = true;
            return Some(RoundOutcome::Failure);
        }
        None
    }

    fn render(&self, ctx: &CanvasRenderingContext2d) {
        ctx.set_fill_style_str("#26202e");
        ctx.fill_rect(0.0, 0.0, self.w, self.h);
        ctx.set_fill_style_str("#c44");
        for b in &self.blocks {
            ctx.fill_rect(b.x - BLOCK / 2.0, b.y - BLOCK / 2.0, BLOCK, BLOCK);
        }
        ctx.begin_path();
        ctx.arc(
            self.player_x,
            self.player_y(),
            PLAYER_R,
            0.0,
            std::f64::consts::TAU,
        )
        .ok();
        ctx.set_fill_style_str(if self.hit { "#ff8080" } else { "#8be28b" });
        ctx.fill();
    }

    fn pointer_down(&mut self, x: f64, y: f64) {
        self.pointer_move(x, y);
    }

    fn pointer_move(&mut self, x: f64, _y: f64) {
        if self.running && !self.resolved {
            self.player_x = x.clamp(PLAYER_R, self.w - PLAYER_R);
        }
    }

    fn time_up(&mut self) -> RoundOutcome {
        self.resolved = true;
        // Survived the full round.
        RoundOutcome::Success {
            raw_score: 30.0 + 12.0 * self.near_misses as f64,
        }
    }

    fn stop(&mut self) {
        self.running = false;
    }
}
