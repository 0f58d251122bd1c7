//! WASM bindings for the wordpad rich-text editor.
//!
//! The page supplies the contenteditable element and the toolbar controls
//! (looked up by id); `JsWordpad.mount` wires them together.

mod editor;
mod types;

pub use editor::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and route `tracing` output to the console.
#[wasm_bindgen(start)]
pub fn init() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    console_error_panic_hook::set_once();

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // Ignore the error when the host page already installed a subscriber.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}
