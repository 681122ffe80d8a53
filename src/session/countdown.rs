//! Cancellable repeating timer for the pre-round countdown.
//!
//! The browser interval is wrapped in a handle that revokes the timer when
//! dropped, so cancellation is "drop the handle" rather than ad hoc nullable
//! bookkeeping. A dropped handle guarantees no further firings.
//!
//! One rule for callers: never drop a handle from inside its own callback
//! (the wasm closure would be freed while executing). The orchestrator drops
//! handles from the frame loop or from host-facing entry points only.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

pub struct IntervalHandle {
    id: i32,
    // Keeps the callback alive for the lifetime of the timer.
    _closure: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    pub fn new(period_ms: i32, callback: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.id);
        }
    }
}
