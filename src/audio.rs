//! Oscillator-synthesized sound effects for screen transitions.
//!
//! Fire-and-forget only: the orchestrator names an effect and never inspects
//! playback state. When the browser refuses to hand out an `AudioContext`
//! (or we are running headless), every call degrades to a no-op so a missing
//! audio device can never fail a round.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Named one-shot effects triggered at session screen transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sfx {
    /// Countdown step (3, 2, 1).
    Tick,
    /// Countdown final beat; the round starts now.
    Go,
    /// Round succeeded.
    Win,
    /// Round failed, a life was lost.
    Lose,
    /// Lives exhausted, session over.
    GameOver,
}

pub struct AudioBank {
    ctx: Option<AudioContext>,
    ambient: Option<(OscillatorNode, GainNode)>,
}

impl AudioBank {
    pub fn new() -> Self {
        Self {
            ctx: AudioContext::new().ok(),
            ambient: None,
        }
    }

    /// Schedule the named effect. Errors from the Web Audio graph are
    /// swallowed; audio is cosmetic.
    pub fn play(&self, sfx: Sfx) {
        // (frequency Hz, offset s, duration s) segments per effect.
        let segments: &[(f32, f64, f64)] = match sfx {
            Sfx::Tick => &[(660.0, 0.0, 0.08)],
            Sfx::Go => &[(990.0, 0.0, 0.22)],
            Sfx::Win => &[(523.0, 0.0, 0.09), (784.0, 0.1, 0.14)],
            Sfx::Lose => &[(220.0, 0.0, 0.12), (165.0, 0.13, 0.2)],
            Sfx::GameOver => &[(196.0, 0.0, 0.25), (147.0, 0.28, 0.25), (98.0, 0.56, 0.5)],
        };
        for &(freq, offset, dur) in segments {
            self.beep(freq, offset, dur);
        }
    }

    fn beep(&self, freq: f32, offset: f64, dur: f64) {
        let Some(ctx) = &self.ctx else { return };
        let t0 = ctx.current_time() + offset;
        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        osc.set_type(OscillatorType::Square);
        osc.frequency().set_value(freq);
        gain.gain().set_value_at_time(0.12, t0).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t0 + dur)
            .ok();
        if osc.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        osc.start_with_when(t0).ok();
        osc.stop_with_when(t0 + dur + 0.02).ok();
    }

    /// Toggle the low ambient drone that runs while a session is live.
    pub fn set_ambient(&mut self, on: bool) {
        if !on {
            if let Some((osc, _gain)) = self.ambient.take() {
                osc.stop().ok();
            }
            return;
        }
        if self.ambient.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        osc.set_type(OscillatorType::Triangle);
        osc.frequency().set_value(55.0);
        gain.gain().set_value(0.03);
        if osc.connect_with_audio_node(&gain).is_err() {
            return;
        }
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            return;
        }
        if osc.start().is_ok() {
            self.ambient = Some((osc, gain));
        }
    }
}

impl Default for AudioBank {
    fn default() -> Self {
        Self::new()
    }
}
