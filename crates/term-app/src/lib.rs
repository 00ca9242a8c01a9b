//! Term App, the WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters, registers the commands and prompts,
//! and exports the resulting terminal to JavaScript, which owns rendering.

mod app;

pub use app::WebTerminal;

use wasm_bindgen::prelude::*;

/// WASM entry point, run when the module is instantiated
#[wasm_bindgen(start)]
pub fn main() {
    // Initialize logging
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Terminal WASM starting...");
}
