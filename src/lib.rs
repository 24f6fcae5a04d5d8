//! Insect Catch core crate.
//!
//! Pick an insect, click the ones that appear, miss five times and it is over.
//! Game rules live in [`session`] and are host-agnostic; [`web`] binds them
//! to the page markup and drives timers from the browser frame loop.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod position;
pub mod session;
pub mod state;
pub mod surface;
pub mod timeline;
mod web;

pub use config::GameConfig;
pub use error::GameError;
pub use position::{RandomSource, SpawnRng};
pub use session::{InputEvent, Session, SessionSnapshot};
pub use state::{GameState, Insect, InsectId, Point, Sprite, Viewport};
pub use surface::{DisplaySurface, Screen};
pub use web::{WebInput, WebSurface};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    {
        // a second init (hot reload) just keeps the first logger
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

// -----------------------------------------------------------------------------
// Browser entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start_web_mode(GameConfig::default())?;
    Ok(())
}

/// Same as [`start_game`] with constants overridden from a JSON object.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::start_web_mode(config)?;
    Ok(())
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn session_snapshot() -> Result<String, JsValue> {
    Ok(web::snapshot_json()?)
}
