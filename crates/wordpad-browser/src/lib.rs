//! Browser DOM layer for the wordpad editor.
//!
//! Implements the `wordpad-core` platform traits on top of `web-sys` and
//! wires the page's toolbar controls to the editor. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `surface`: contenteditable element driven by `execCommand` and the
//!   Selection API
//! - `storage`: localStorage-backed `KeyValueStore`
//! - `notify`: transient toast messages
//! - `timer`: the autosave interval
//! - `export`: file download and jsPDF rendering
//! - `controls`: toolbar event listeners and `mount`
//!
//! # Re-exports
//!
//! This crate re-exports `wordpad-core` for convenience, so consumers only
//! need to depend on `wordpad-browser`.

pub use wordpad_core;
pub use wordpad_core::*;

pub mod controls;
pub mod export;
pub mod notify;
pub mod storage;
pub mod surface;
pub mod timer;

pub use controls::{MountedEditor, mount};
pub use notify::ToastNotifier;
pub use storage::LocalStore;
pub use surface::BrowserSurface;
pub use timer::AutosaveTimer;

use wasm_bindgen::{JsCast, JsValue};

/// The editor as assembled in a browser page.
pub type BrowserWordpad = Wordpad<BrowserSurface, LocalStore, ToastNotifier>;

/// Best-effort message from a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(exception) = value.dyn_ref::<web_sys::DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Convert a thrown JS value into an editor error.
pub fn platform_error(value: JsValue) -> EditorError {
    EditorError::Platform(js_message(&value))
}

pub(crate) fn window() -> Result<web_sys::Window, EditorError> {
    web_sys::window().ok_or_else(|| EditorError::Platform("no window".into()))
}

pub(crate) fn document() -> Result<web_sys::Document, EditorError> {
    window()?
        .document()
        .ok_or_else(|| EditorError::Platform("no document".into()))
}
