//! Session orchestration: the shift of minigames from start screen to game
//! over.
//!
//! This module owns the only mutable aggregate in the crate: the session
//! state holding score, rounds, lives and the single active minigame slot.
//! The pure state machine lives in [`core`]; this file is the browser layer
//! around it — canvas + HUD setup, pointer routing, the countdown interval,
//! the animation-frame driver, and the transition/result/game-over screens.
//!
//! Ownership rules enforced here:
//! - at most one minigame instance exists, and `stop()` runs synchronously
//!   before the slot is cleared or refilled;
//! - the countdown interval handle is dropped (cancelling the timer) before
//!   any transition that leaves the countdown screen, and never from inside
//!   its own callback;
//! - pointer events reach the active minigame only while its round is live.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

pub mod core;
mod countdown;
pub mod score;
pub mod selector;
mod slot;

use crate::audio::{AudioBank, Sfx};
use crate::minigames::{self, MinigameId, RoundOutcome};
use crate::rng::Lcg;
use self::core::{CountdownEvent, MAX_LIVES, Phase, SessionCore};
use self::countdown::IntervalHandle;
use self::slot::RoundSlot;

const STAGE_W: u32 = 480;
const STAGE_H: u32 = 720;
const COUNTDOWN_PERIOD_MS: i32 = 900;
const HEART_FULL: &str = "<span style='color:#ff4d4d;font-size:16px;margin-right:6px;'>♥</span>";
const HEART_EMPTY: &str = "<span style='color:#6b6b6b;font-size:16px;margin-right:6px;'>♡</span>";

/// Runtime session state. Owned by the thread-local slot below; one per page.
struct SessionState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: SessionCore,
    /// The single active minigame slot. Occupied only while `Phase::Playing`.
    slot: RoundSlot,
    /// Countdown cancellation token; dropping it revokes the timer.
    countdown_timer: Option<IntervalHandle>,
    round_deadline_ms: f64,
    round_duration_ms: f64,
    last_frame_ms: f64,
    rng: Lcg,
    audio: AudioBank,
    debug_visible: bool,
    /// Contract violations observed at runtime (double completion, missing
    /// instance). Logged on the debug overlay instead of crashing the shift.
    violations: Vec<&'static str>,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static SESSION_STATE: std::cell::RefCell<Option<SessionState>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// -----------------------------------------------------------------------------
// Bootstrap
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_session_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the stage canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("mp-stage") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("mp-stage");
        c.set_width(STAGE_W);
        c.set_height(STAGE_H);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:18px; border:2px solid #222; background:#101418; z-index:20; touch-action:none;").ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_text_align("center");

    // Score overlay (top-left)
    if doc.get_element_by_id("mp-score").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("mp-score");
            div.set_text_content(Some("Score: 0"));
            div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }
    // Lives overlay (top-left, next to score)
    if doc.get_element_by_id("mp-lives").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("mp-lives");
            div.set_inner_html(&HEART_FULL.repeat(MAX_LIVES as usize));
            div.set_attribute("style", "position:fixed; top:10px; left:170px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; z-index:44; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }
    // Debug overlay (hidden until toggled with 'd')
    if doc.get_element_by_id("mp-debug").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("mp-debug");
            div.set_attribute("style", "position:fixed; bottom:10px; left:12px; display:none; font-family:'Fira Code', monospace; font-size:12px; padding:4px 8px; background:rgba(0,0,0,0.6); border:1px solid #333; border-radius:6px; color:#9ad; z-index:50; white-space:pre;").ok();
            body.append_child(&div)?;
        }
    }

    let now = win
        .performance()
        .map(|p| p.now())
        .unwrap_or(0.0);
    // With the `rng` feature the seed comes from browser entropy; otherwise
    // the clock is plenty for party-game shuffling.
    #[cfg(feature = "rng")]
    let seed = crate::rng::entropy_seed().unwrap_or_else(|| now.to_bits());
    #[cfg(not(feature = "rng"))]
    let seed = now.to_bits();
    let state = SessionState {
        canvas: canvas.clone(),
        ctx,
        core: SessionCore::new(&MinigameId::ALL),
        slot: RoundSlot::new(),
        countdown_timer: None,
        round_deadline_ms: 0.0,
        round_duration_ms: 0.0,
        last_frame_ms: 0.0,
        rng: Lcg::new(seed),
        audio: AudioBank::new(),
        debug_visible: false,
        violations: Vec::new(),
    };
    SESSION_STATE.with(|cell| cell.replace(Some(state)));

    attach_pointer_listeners(&canvas)?;
    attach_keyboard_listener(&doc)?;
    start_frame_loop();
    Ok(())
}

fn attach_pointer_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Mouse
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            on_pointer(PointerKind::Down, evt.offset_x() as f64, evt.offset_y() as f64);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            on_pointer(PointerKind::Move, evt.offset_x() as f64, evt.offset_y() as f64);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            on_pointer(PointerKind::Up, evt.offset_x() as f64, evt.offset_y() as f64);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Touch: convert client coordinates to canvas-local ones.
    {
        let c = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            evt.prevent_default();
            if let Some(t) = evt.touches().get(0) {
                let (x, y) = touch_to_local(&c, t.client_x() as f64, t.client_y() as f64);
                on_pointer(PointerKind::Down, x, y);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let c = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            evt.prevent_default();
            if let Some(t) = evt.touches().get(0) {
                let (x, y) = touch_to_local(&c, t.client_x() as f64, t.client_y() as f64);
                on_pointer(PointerKind::Move, x, y);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let c = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            if let Some(t) = evt.changed_touches().get(0) {
                let (x, y) = touch_to_local(&c, t.client_x() as f64, t.client_y() as f64);
                on_pointer(PointerKind::Up, x, y);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn touch_to_local(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (client_x - rect.left(), client_y - rect.top())
}

fn attach_keyboard_listener(doc: &web_sys::Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let key = evt.key();
        if key == "d" {
            SESSION_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.debug_visible = !state.debug_visible;
                }
            });
        } else if key == "Escape" {
            // Abandon path: always legal, tears everything down.
            SESSION_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    abandon_to_idle(state);
                }
            });
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// -----------------------------------------------------------------------------
// Host-facing session API
// -----------------------------------------------------------------------------

/// Begin a fresh session from the idle/start screen.
#[wasm_bindgen]
pub fn start_run() {
    SESSION_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            start_run_inner(state);
        }
    });
}

/// Advance from a result screen into the next round's countdown.
#[wasm_bindgen]
pub fn next_round() {
    SESSION_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            next_round_inner(state);
        }
    });
}

/// Force the active round to resolve. Normally rounds resolve themselves
/// through the minigame contract; this is the host-facing escape hatch.
#[wasm_bindgen]
pub fn end_round(success: bool, raw_score: f64) {
    SESSION_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            finish_round(state, success, raw_score);
        }
    });
}

/// Reset to the idle/start screen, clearing the session.
#[wasm_bindgen]
pub fn show_start_screen() {
    SESSION_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            abandon_to_idle(state);
        }
    });
}

/// Developer overlay with round/timer diagnostics ('d' key does the same).
#[wasm_bindgen]
pub fn toggle_debug_overlay() {
    SESSION_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.debug_visible = !state.debug_visible;
        }
    });
}

fn start_run_inner(state: &mut SessionState) {
    let rng = &mut state.rng;
    if state.core.start_run(|n| rng.roll(n)).is_some() {
        state.audio.set_ambient(true);
        start_countdown(state);
    }
}

fn next_round_inner(state: &mut SessionState) {
    let rng = &mut state.rng;
    if state.core.next_round(|n| rng.roll(n)).is_some() {
        start_countdown(state);
    }
}

fn abandon_to_idle(state: &mut SessionState) {
    // Cancel the countdown first: no tick may fire after this point. Safe
    // here because this function is never reached from the interval's own
    // callback.
    state.countdown_timer = None;
    state.slot.clear();
    state.core.reset();
    state.audio.set_ambient(false);
}

// -----------------------------------------------------------------------------
// Countdown
// -----------------------------------------------------------------------------

fn start_countdown(state: &mut SessionState) {
    let timer = IntervalHandle::new(COUNTDOWN_PERIOD_MS, || {
        SESSION_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                match state.core.countdown_step() {
                    Some(CountdownEvent::Tick(_)) => state.audio.play(Sfx::Tick),
                    Some(CountdownEvent::Final) => state.audio.play(Sfx::Go),
                    // Timer lost the cancellation race; the frame loop will
                    // collect the handle.
                    None => {}
                }
            }
        });
    });
    match timer {
        Ok(handle) => state.countdown_timer = Some(handle),
        Err(_) => {
            // No timer available: degrade by skipping the countdown rather
            // than stranding the session on the transition screen.
            while let Some(evt) = state.core.countdown_step() {
                if evt == CountdownEvent::Final {
                    break;
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Round lifecycle
// -----------------------------------------------------------------------------

/// Hand the stage to the chosen minigame. Runs on the first frame after the
/// countdown's final beat, which also makes this the safe place to drop the
/// interval handle (we are outside its callback here).
fn spawn_active_game(state: &mut SessionState, now: f64) {
    state.countdown_timer = None;
    let Some(id) = state.core.current_game() else {
        state.violations.push("playing phase with no selected game");
        abandon_to_idle(state);
        return;
    };
    let desc = minigames::descriptor(id);
    let seed = ((state.rng.next_u32() as u64) << 32) | state.rng.next_u32() as u64;
    let game = (desc.factory)(STAGE_W as f64, STAGE_H as f64, seed);
    if state.slot.deploy(game) {
        // Two live instances would violate the single-owner invariant; the
        // slot already stopped the stale one before the handoff.
        state.violations.push("spawn with previous instance still live");
    }
    state.round_duration_ms = desc.duration_ms;
    state.round_deadline_ms = now + desc.duration_ms;
}

/// Resolve the active round: stop + release the instance, then feed the
/// result through the state machine and play the matching jingle.
fn finish_round(state: &mut SessionState, success: bool, raw_score: f64) {
    if state.core.phase() != Phase::Playing {
        // Second completion signal, or a result with no round active.
        state.violations.push("round result outside an active round");
        return;
    }
    state.slot.clear();
    let Some(end) = state.core.end_round(success, raw_score) else {
        return; // unreachable given the phase check above
    };
    if end.exhausted {
        state.audio.set_ambient(false);
        state.audio.play(Sfx::GameOver);
    } else if end.success {
        state.audio.play(Sfx::Win);
    } else {
        state.audio.play(Sfx::Lose);
    }
}

// -----------------------------------------------------------------------------
// Input routing
// -----------------------------------------------------------------------------

enum PointerKind {
    Down,
    Move,
    Up,
}

fn on_pointer(kind: PointerKind, x: f64, y: f64) {
    SESSION_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            match state.core.phase() {
                Phase::Playing => {
                    if let Some(game) = state.slot.active_mut() {
                        match kind {
                            PointerKind::Down => game.pointer_down(x, y),
                            PointerKind::Move => game.pointer_move(x, y),
                            PointerKind::Up => game.pointer_up(x, y),
                        }
                    }
                }
                // Screen taps drive the session forward outside of rounds.
                Phase::Idle => {
                    if matches!(kind, PointerKind::Down) {
                        start_run_inner(state);
                    }
                }
                Phase::Resolving => {
                    if matches!(kind, PointerKind::Down) {
                        next_round_inner(state);
                    }
                }
                Phase::Exhausted => {
                    if matches!(kind, PointerKind::Down) {
                        abandon_to_idle(state);
                    }
                }
                Phase::Transitioning => {}
            }
        }
    });
}

// -----------------------------------------------------------------------------
// Frame loop
// -----------------------------------------------------------------------------

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        SESSION_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                session_tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn session_tick(state: &mut SessionState, now: f64) {
    let dt = if state.last_frame_ms > 0.0 {
        // A backgrounded tab can pause rAF for seconds; cap the catch-up step
        // so simulations don't teleport.
        (now - state.last_frame_ms).clamp(0.0, 100.0)
    } else {
        0.0
    };
    state.last_frame_ms = now;

    match state.core.phase() {
        Phase::Idle => render_start_screen(state, now),
        Phase::Transitioning => render_transition(state, now),
        Phase::Playing => {
            if !state.slot.is_occupied() {
                spawn_active_game(state, now);
            }
            let outcome = state.slot.active_mut().and_then(|game| game.advance(dt));
            match outcome {
                Some(RoundOutcome::Success { raw_score }) => {
                    finish_round(state, true, raw_score);
                }
                Some(RoundOutcome::Failure) => {
                    finish_round(state, false, 0.0);
                }
                None => {
                    if now >= state.round_deadline_ms {
                        // Round clock expired; the game must judge itself.
                        let verdict = state.slot.active_mut().map(|game| game.time_up());
                        match verdict {
                            Some(RoundOutcome::Success { raw_score }) => {
                                finish_round(state, true, raw_score);
                            }
                            Some(RoundOutcome::Failure) | None => {
                                finish_round(state, false, 0.0);
                            }
                        }
                    } else if let Some(game) = state.slot.active() {
                        game.render(&state.ctx);
                        draw_time_bar(state, now);
                    }
                }
            }
        }
        Phase::Resolving => render_result(state),
        Phase::Exhausted => render_game_over(state),
    }
    update_hud(state, now);
}

// -----------------------------------------------------------------------------
// Screens
// -----------------------------------------------------------------------------

fn stage_size(state: &SessionState) -> (f64, f64) {
    (state.canvas.width() as f64, state.canvas.height() as f64)
}

fn render_start_screen(state: &SessionState, now: f64) {
    let (w, h) = stage_size(state);
    let ctx = &state.ctx;
    let grad = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    grad.add_color_stop(0.0, "#1a1030").ok();
    grad.add_color_stop(1.0, "#0c1422").ok();
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill_rect(0.0, 0.0, w, h);

    let pulse = ((now / 600.0).sin() * 0.5 + 0.5) * 0.4 + 0.6;
    ctx.set_fill_style_str("#ffd166");
    ctx.set_font("54px 'Fira Code', monospace");
    ctx.fill_text("MICRO PARTY", w / 2.0, h * 0.36).ok();
    ctx.set_fill_style_str(&format!("rgba(240,244,255,{pulse:.2})"));
    ctx.set_font("22px 'Fira Code', monospace");
    ctx.fill_text("Tap to start", w / 2.0, h * 0.56).ok();
    ctx.set_fill_style_str("rgba(160,170,190,0.7)");
    ctx.set_font("14px 'Fira Code', monospace");
    ctx.fill_text(
        &format!("{} minigames · {} lives", minigames::CATALOG.len(), MAX_LIVES),
        w / 2.0,
        h * 0.62,
    )
    .ok();
}

fn render_transition(state: &SessionState, now: f64) {
    let (w, h) = stage_size(state);
    let ctx = &state.ctx;
    let pulse = ((now / 300.0).sin() * 0.5 + 0.5) * 20.0;
    let bg = 16.0 + pulse;
    ctx.set_fill_style_str(&format!("rgb({0:.0},{1:.0},{2:.0})", bg, bg + 4.0, bg + 10.0));
    ctx.fill_rect(0.0, 0.0, w, h);

    if let Some(id) = state.core.current_game() {
        let desc = minigames::descriptor(id);
        ctx.set_fill_style_str("#ffd166");
        ctx.set_font("64px 'Fira Code', monospace");
        ctx.fill_text(desc.label, w / 2.0, h * 0.32).ok();
        ctx.set_fill_style_str("#f0f4ff");
        ctx.set_font("20px 'Fira Code', monospace");
        ctx.fill_text(desc.tagline, w / 2.0, h * 0.40).ok();
    }
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("120px 'Fira Code', monospace");
    ctx.fill_text(&state.core.countdown_display().to_string(), w / 2.0, h * 0.68)
        .ok();
}

fn render_result(state: &SessionState) {
    let (w, h) = stage_size(state);
    let ctx = &state.ctx;
    let won = state.core.last_reward() > 0;
    ctx.set_fill_style_str(if won { "#12281a" } else { "#2a1416" });
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_font("56px 'Fira Code', monospace");
    if won {
        ctx.set_fill_style_str("#8be28b");
        ctx.fill_text("NICE!", w / 2.0, h * 0.36).ok();
        ctx.set_fill_style_str("#ffd166");
        ctx.set_font("30px 'Fira Code', monospace");
        ctx.fill_text(
            &format!("+{}", state.core.last_reward()),
            w / 2.0,
            h * 0.46,
        )
        .ok();
    } else {
        ctx.set_fill_style_str("#ff8080");
        ctx.fill_text("MISS!", w / 2.0, h * 0.36).ok();
        ctx.set_fill_style_str("#f0f4ff");
        ctx.set_font("24px 'Fira Code', monospace");
        ctx.fill_text(
            &format!("{} lives left", state.core.lives().value()),
            w / 2.0,
            h * 0.46,
        )
        .ok();
    }
    ctx.set_fill_style_str("rgba(240,244,255,0.8)");
    ctx.set_font("20px 'Fira Code', monospace");
    ctx.fill_text("Tap to continue", w / 2.0, h * 0.62).ok();
}

fn render_game_over(state: &SessionState) {
    let (w, h) = stage_size(state);
    let ctx = &state.ctx;
    ctx.set_fill_style_str("rgba(10,8,12,1.0)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("64px 'Fira Code', monospace");
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str("#000000");
    ctx.stroke_text("GAME OVER", w / 2.0, h * 0.38).ok();
    ctx.fill_text("GAME OVER", w / 2.0, h * 0.38).ok();
    ctx.set_fill_style_str("#ffd166");
    ctx.set_font("26px 'Fira Code', monospace");
    ctx.fill_text(
        &format!(
            "Score {} · {} rounds",
            state.core.total_score(),
            state.core.rounds_completed()
        ),
        w / 2.0,
        h * 0.48,
    )
    .ok();
    ctx.set_fill_style_str("rgba(240,244,255,0.8)");
    ctx.set_font("20px 'Fira Code', monospace");
    ctx.fill_text("Tap for title", w / 2.0, h * 0.62).ok();
}

/// Depleting round clock drawn over the active minigame's frame.
fn draw_time_bar(state: &SessionState, now: f64) {
    let (w, _h) = stage_size(state);
    let ctx = &state.ctx;
    let remaining = (state.round_deadline_ms - now).max(0.0);
    let frac = if state.round_duration_ms > 0.0 {
        remaining / state.round_duration_ms
    } else {
        0.0
    };
    ctx.set_fill_style_str("rgba(0,0,0,0.45)");
    ctx.fill_rect(0.0, 0.0, w, 14.0);
    ctx.set_fill_style_str(if frac > 0.3 { "#8be28b" } else { "#ff8080" });
    ctx.fill_rect(2.0, 2.0, (w - 4.0) * frac, 10.0);
}

// -----------------------------------------------------------------------------
// HUD overlays
// -----------------------------------------------------------------------------

fn update_hud(state: &SessionState, now: f64) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(el) = doc.get_element_by_id("mp-score") {
        el.set_text_content(Some(&format!("Score: {}", state.core.total_score())));
    }
    if let Some(el) = doc.get_element_by_id("mp-lives") {
        let filled = state.core.lives().value().min(MAX_LIVES) as usize;
        let mut html = HEART_FULL.repeat(filled);
        html.push_str(&HEART_EMPTY.repeat(MAX_LIVES as usize - filled));
        el.set_inner_html(&html);
    }
    if let Some(el) = doc.get_element_by_id("mp-debug") {
        if state.debug_visible {
            el.set_attribute("style", "position:fixed; bottom:10px; left:12px; display:block; font-family:'Fira Code', monospace; font-size:12px; padding:4px 8px; background:rgba(0,0,0,0.6); border:1px solid #333; border-radius:6px; color:#9ad; z-index:50; white-space:pre;").ok();
            let remaining = ((state.round_deadline_ms - now) / 1000.0).max(0.0);
            el.set_text_content(Some(&format!(
                "phase: {:?}\nround: {}\ngame: {:?}\nclock: {:.1}s\nviolations: {}{}",
                state.core.phase(),
                state.core.rounds_completed(),
                state.core.current_game(),
                remaining,
                state.violations.len(),
                state
                    .violations
                    .last()
                    .map(|v| format!(" (last: {v})"))
                    .unwrap_or_default(),
            )));
        } else {
            el.set_attribute("style", "display:none;").ok();
        }
    }
}
