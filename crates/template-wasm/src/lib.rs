//! WebAssembly bindings for Junocash block template decoding.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Decoding a `getblocktemplate` response into a header base and target
//! - Writing nonces into the header for a browser-side RandomX engine
//! - Reading back the solved header and transactions for submission

use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod state;

// Re-export main types for JS access
pub use bindings::JunoTemplate;
pub use state::TemplateInfo;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
