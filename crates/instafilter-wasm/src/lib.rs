//! InstaFilter WASM - WebAssembly bindings for the filter screen
//!
//! This crate exposes `instafilter-core` to a JavaScript UI.
//!
//! # Module Structure
//!
//! - `session` - the filter session (filter choice, sliders, source, save)
//! - `types` - WASM-compatible image wrapper
//! - `sink` - persistence through a JS callback
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsFilterSession, filter_names } from '@instafilter/wasm';
//!
//! await init();
//! const session = new JsFilterSession();
//! const labels = filter_names(); // for the filter picker
//! ```

use instafilter_core::FilterKind;
use wasm_bindgen::prelude::*;

mod session;
mod sink;
mod types;

pub use session::JsFilterSession;
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (e.g. module re-instantiated) keeps the first logger
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("InstaFilter WASM {} ready", version());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Filter labels in picker order; the index is what `select_filter` takes.
#[wasm_bindgen]
pub fn filter_names() -> Vec<String> {
    FilterKind::ALL
        .iter()
        .map(|kind| kind.display_name().to_string())
        .collect()
}
