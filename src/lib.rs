//! Micro Party core crate.
//!
//! A compilation of very short (4-10 second) canvas minigames strung together
//! by a session orchestrator that tracks score and lives across rounds. The
//! orchestration protocol (countdown, handoff to the active minigame, result
//! collection, streak scoring, lives budget) lives in [`session`]; the
//! individual minigames are small self-contained simulations under
//! [`minigames`] that all conform to the same [`minigames::Minigame`]
//! contract.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod minigames;
pub mod rng;
pub mod session;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Boot the party-game shell: creates the stage canvas and HUD overlays,
/// wires input listeners, and starts the frame loop on the idle/start screen.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    session::start_session_mode()
}
