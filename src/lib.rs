//! Item tracker core crate.
//!
//! Click-driven checklist overlay: every element marked with the tracker class
//! toggles between a bright and a dim look when clicked, and a few progressive
//! items (sword, flute, shield) step through their upgrade images first.
//! Call `init_tracker()` from JS once the tracker markup is in the document.

use wasm_bindgen::prelude::*;

pub mod error;
mod logger;
pub mod tracker;

pub use error::TrackerError;
pub use tracker::{ItemRecord, ItemSurface, ItemToggler, ProgressiveItem, Step, TrackerConfig};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Binds the built-in tracker setup to the current document.
#[wasm_bindgen]
pub fn init_tracker() -> Result<(), JsValue> {
    tracker::dom::start_tracker(TrackerConfig::default())
}

/// Same as [`init_tracker`] with a JSON [`TrackerConfig`].
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn init_tracker_with_config(json: &str) -> Result<(), JsValue> {
    let config = TrackerConfig::from_json(json)?;
    tracker::dom::start_tracker(config)
}
