//! Editor configuration.
//!
//! Every field has a default, so an empty object (or no configuration at
//! all) gives a working editor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::autosave::{AutosaveConfig, DEFAULT_AUTOSAVE_KEY};
use crate::error::EditorError;
use crate::export::{PdfLayout, PdfMode};
use crate::markup::PLACEHOLDER;
use crate::theme::DEFAULT_THEME_KEY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Id of the contenteditable element.
    pub editor_id: String,
    pub autosave_key: String,
    /// Autosave period in milliseconds. Zero disables the timer.
    pub autosave_interval_ms: u32,
    pub theme_key: String,
    /// Markup installed by the reset button.
    pub placeholder: String,
    pub doc_file_name: String,
    pub pdf_file_name: String,
    pub pdf_mode: PdfMode,
    pub pdf: PdfLayout,
    /// How long a notification stays on screen, in milliseconds.
    pub toast_duration_ms: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editor_id: "editor".to_string(),
            autosave_key: DEFAULT_AUTOSAVE_KEY.to_string(),
            autosave_interval_ms: 5000,
            theme_key: DEFAULT_THEME_KEY.to_string(),
            placeholder: PLACEHOLDER.to_string(),
            doc_file_name: "document.doc".to_string(),
            pdf_file_name: "document.pdf".to_string(),
            pdf_mode: PdfMode::Html,
            pdf: PdfLayout::default(),
            toast_duration_ms: 3000,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn autosave(&self) -> AutosaveConfig {
        AutosaveConfig {
            key: self.autosave_key.clone(),
            interval: Duration::from_millis(u64::from(self.autosave_interval_ms)),
        }
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave_interval_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.autosave().interval, Duration::from_millis(5000));
        assert_eq!(config.autosave().key, "wordpad:autosave");
        assert_eq!(config.placeholder, "<p>Start typing here...</p>");
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_json(
            r#"{"autosave_interval_ms": 0, "pdf_mode": "plain", "pdf": {"margin_x": 20}}"#,
        )
        .unwrap();
        assert!(!config.autosave_enabled());
        assert_eq!(config.pdf_mode, PdfMode::Plain);
        assert_eq!(config.pdf.margin_x, 20.0);
        assert_eq!(config.pdf.content_width, 180.0);
        assert_eq!(config.editor_id, "editor");
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = EditorConfig::from_json("{\"editor_id\": 3}").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }
}
