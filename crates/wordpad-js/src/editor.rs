//! JsWordpad - the mounted editor as seen from JavaScript.

use std::cell::{Ref, RefMut};

use wasm_bindgen::prelude::*;
use wordpad_browser::{
    BrowserWordpad, DocumentSurface, EditorConfig, MountedEditor, ToolbarAction, ToolbarKind, mount,
};

use crate::types::{EditorStatus, JsOutcome};

/// Editor handle exposed to JavaScript.
///
/// Create it, then `mount` it onto a page that provides the editor element
/// and whichever toolbar controls it wants.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsWordpad {
    mounted: Option<MountedEditor>,
}

#[wasm_bindgen]
impl JsWordpad {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    // === Lifecycle ===

    /// Attach to the page. `config` is an optional object using the
    /// `EditorConfig` field names; missing fields take their defaults.
    pub fn mount(&mut self, config: JsValue) -> Result<(), JsError> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };

        self.unmount();
        let mounted = mount(config).map_err(|e| JsError::new(&e.to_string()))?;
        self.mounted = Some(mounted);
        Ok(())
    }

    /// Detach all listeners and stop autosave. Safe to call when not mounted.
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.unmount();
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    // === Content access ===

    #[wasm_bindgen(js_name = getContent)]
    pub fn get_content(&self) -> Result<String, JsError> {
        Ok(self.editor()?.content())
    }

    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&self, markup: &str) -> Result<(), JsError> {
        self.editor_mut()?.surface_mut().set_content(markup);
        Ok(())
    }

    // === Actions ===

    /// Run the action behind a toolbar control, e.g.
    /// `dispatch("fontSize", "5")` or `dispatch("insertTableBtn", "2x3")`.
    pub fn dispatch(&self, control_id: &str, value: Option<String>) -> Result<JsOutcome, JsError> {
        let mounted = self.mounted()?;
        let kind = ToolbarKind::from_control_id(control_id)
            .ok_or_else(|| JsError::new(&format!("Unknown control: {}", control_id)))?;
        let pdf_mode = self.editor()?.config().pdf_mode;
        let Some(action) = kind.into_action(value.as_deref(), pdf_mode) else {
            return Ok(JsOutcome::Ignored);
        };
        self.run(mounted, &action)
    }

    #[wasm_bindgen(js_name = togglePainter)]
    pub fn toggle_painter(&self) -> Result<JsOutcome, JsError> {
        self.run(self.mounted()?, &ToolbarAction::FormatPainter)
    }

    /// Save the document now, outside the autosave schedule.
    pub fn save(&self) -> Result<JsOutcome, JsError> {
        self.run(self.mounted()?, &ToolbarAction::Save)
    }

    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> Result<EditorStatus, JsError> {
        let editor = self.editor()?;
        Ok(EditorStatus::new(
            editor.painter().is_active(),
            editor.buttons(),
            editor.theme(),
        ))
    }
}

impl JsWordpad {
    /// The mounted editor, for Rust callers embedding this handle.
    pub fn mounted_editor(&self) -> Option<&MountedEditor> {
        self.mounted.as_ref()
    }

    fn mounted(&self) -> Result<&MountedEditor, JsError> {
        self.mounted
            .as_ref()
            .ok_or_else(|| JsError::new("Editor is not mounted"))
    }

    // A JS callback can re-enter while a toolbar handler holds the editor.
    fn editor(&self) -> Result<Ref<'_, BrowserWordpad>, JsError> {
        self.mounted()?
            .editor()
            .try_borrow()
            .map_err(|_| JsError::new("Editor is busy"))
    }

    fn editor_mut(&self) -> Result<RefMut<'_, BrowserWordpad>, JsError> {
        self.mounted()?
            .editor()
            .try_borrow_mut()
            .map_err(|_| JsError::new("Editor is busy"))
    }

    fn run(&self, mounted: &MountedEditor, action: &ToolbarAction) -> Result<JsOutcome, JsError> {
        if mounted.editor().try_borrow_mut().is_err() {
            return Err(JsError::new("Editor is busy"));
        }
        let Some(outcome) = mounted.dispatch(action) else {
            return Ok(JsOutcome::Failed);
        };
        let painter_active = self.editor()?.painter().is_active();
        Ok(JsOutcome::from_outcome(&outcome, painter_active))
    }
}
