//! Types exposed to JavaScript via wasm-bindgen.

use serde::Serialize;
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;
use wordpad_core::{DispatchOutcome, Theme};

/// Result of a toolbar action, as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum JsOutcome {
    Applied,
    Ignored,
    /// The action failed; the user has already been notified.
    Failed,
    Preview { markup: String },
    ExportDoc { file_name: String },
    ExportPdf { file_name: String, mode: String },
    Painter { active: bool },
    Theme { theme: String },
    Saved,
}

impl JsOutcome {
    pub fn from_outcome(outcome: &DispatchOutcome, painter_active: bool) -> Self {
        match outcome {
            DispatchOutcome::Applied => Self::Applied,
            DispatchOutcome::Ignored => Self::Ignored,
            DispatchOutcome::Preview(markup) => Self::Preview {
                markup: markup.clone(),
            },
            DispatchOutcome::ExportDoc(export) => Self::ExportDoc {
                file_name: export.file_name.clone(),
            },
            DispatchOutcome::ExportPdf(request) => Self::ExportPdf {
                file_name: request.file_name().to_string(),
                mode: request.mode().as_str().to_string(),
            },
            DispatchOutcome::Painter(_) => Self::Painter {
                active: painter_active,
            },
            DispatchOutcome::Theme(theme) => Self::Theme {
                theme: theme.as_str().to_string(),
            },
            DispatchOutcome::Saved => Self::Saved,
        }
    }
}

/// Toolbar-relevant editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct EditorStatus {
    pub painter_active: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub theme: String,
}

impl EditorStatus {
    pub fn new(painter_active: bool, buttons: wordpad_core::ButtonStates, theme: Theme) -> Self {
        Self {
            painter_active,
            bold: buttons.bold,
            italic: buttons.italic,
            underline: buttons.underline,
            theme: theme.as_str().to_string(),
        }
    }
}
