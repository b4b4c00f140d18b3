//! CVOps WASM - WebAssembly bindings for cvops-core
//!
//! Exposes the operation catalog, image decoding, operation dispatch, and PNG
//! encoding to JavaScript so the whole request flow can run in the browser.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for BGR image buffers
//! - `codec` - Decoding uploads and encoding PNG results
//! - `operations` - Catalog listing and operation dispatch
//!
//! # Usage
//!
//! ```typescript
//! import init, { catalog, decode_image, apply_operation, encode_png } from '@cvops/wasm';
//!
//! await init();
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const result = apply_operation('Neighbourhood Operations', 'Mean filter', { ksize: '5' }, image);
//! const png = encode_png(result);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod operations;
mod types;

pub use codec::{decode_image, encode_png};
pub use operations::{apply_operation, catalog};
pub use types::JsImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    // A second init (e.g. module re-instantiation) finds the logger already set
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("cvops wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert any displayable error into a JS string value.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
