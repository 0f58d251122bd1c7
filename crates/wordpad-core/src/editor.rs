//! The editor: surface, store and notifier wired to the painter, toolbar,
//! autosave and theme.

use web_time::Instant;

use crate::autosave::Autosave;
use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::export::{DocExport, PdfRequest};
use crate::painter::{ApplyOutcome, CaptureOutcome, FormatPainter};
use crate::platform::{DocumentSurface, KeyValueStore, Notifier};
use crate::theme::Theme;
use crate::toolbar::{Toolbar, ToolbarAction};
use crate::types::ButtonStates;

/// What a dispatched action produced. Outcomes other than `Applied` and
/// `Ignored` carry work the platform finishes (opening a window, starting a
/// download, switching a class).
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The document or editor state changed.
    Applied,
    /// Nothing to do, e.g. an empty URL.
    Ignored,
    /// Markup for the preview window.
    Preview(String),
    ExportDoc(DocExport),
    ExportPdf(PdfRequest),
    Painter(CaptureOutcome),
    /// The theme now in effect.
    Theme(Theme),
    Saved,
}

pub struct Wordpad<S, K, N> {
    pub(crate) surface: S,
    pub(crate) store: K,
    pub(crate) notifier: N,
    pub(crate) config: EditorConfig,
    pub(crate) painter: FormatPainter,
    pub(crate) autosave: Autosave,
    pub(crate) buttons: ButtonStates,
    pub(crate) theme: Theme,
    toolbar: Toolbar<S, K, N>,
}

impl<S, K, N> Wordpad<S, K, N>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    pub fn new(surface: S, store: K, notifier: N, config: EditorConfig) -> Self {
        Self {
            autosave: Autosave::new(config.autosave()),
            surface,
            store,
            notifier,
            config,
            painter: FormatPainter::new(),
            buttons: ButtonStates::default(),
            theme: Theme::default(),
            toolbar: Toolbar::new(),
        }
    }

    /// Restore the autosaved draft and the stored theme.
    ///
    /// Storage failures are logged; the editor keeps its current content and
    /// the default theme.
    pub fn start(&mut self) -> Theme {
        match self.autosave.restore(&mut self.surface, &self.store) {
            Ok(restored) => tracing::debug!(restored, "autosave restore"),
            Err(err) => tracing::warn!(error = %err, "could not restore autosave"),
        }
        self.theme = Theme::load(&self.store, &self.config.theme_key).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not load theme");
            Theme::default()
        });
        self.theme
    }

    /// Run an action through the dispatch table.
    pub fn dispatch(&mut self, action: &ToolbarAction) -> Result<DispatchOutcome, EditorError> {
        let kind = action.kind();
        let Some(handler) = self.toolbar.handler(kind) else {
            return Ok(DispatchOutcome::Ignored);
        };
        tracing::debug!(?kind, "dispatch");
        handler(self, action)
    }

    /// Dispatch, turning errors into a notification. Returns `None` if the
    /// action failed.
    pub fn handle(&mut self, action: &ToolbarAction) -> Option<DispatchOutcome> {
        match self.dispatch(action) {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::warn!(kind = ?action.kind(), error = %err, "toolbar action failed");
                self.notifier.notify(&err.to_string());
                None
            }
        }
    }

    /// The user finished a selection on the surface.
    pub fn selection_finished(&mut self) -> ApplyOutcome {
        self.painter
            .apply_at_selection(&mut self.surface, &self.notifier)
    }

    /// Called from the autosave timer.
    pub fn autosave_tick(&mut self, now: Instant) -> Result<bool, EditorError> {
        self.autosave.tick(&self.surface, &mut self.store, now)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn painter(&self) -> &FormatPainter {
        &self.painter
    }

    pub fn buttons(&self) -> ButtonStates {
        self.buttons
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn content(&self) -> String {
        self.surface.content()
    }
}

impl<S, K, N> std::fmt::Debug for Wordpad<S, K, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wordpad")
            .field("painter", &self.painter)
            .field("buttons", &self.buttons)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::commands::FormattingCommand;
    use crate::export::PdfMode;
    use crate::memory::{MemoryStore, MemorySurface, RecordingNotifier};
    use crate::painter::MSG_APPLIED;

    type TestEditor = Wordpad<MemorySurface, MemoryStore, RecordingNotifier>;

    fn editor(markup: &str) -> TestEditor {
        Wordpad::new(
            MemorySurface::new(markup),
            MemoryStore::new(),
            RecordingNotifier::new(),
            EditorConfig::default(),
        )
    }

    #[test]
    fn test_every_control_has_a_handler() {
        let editor = editor("");
        assert_eq!(editor.toolbar.len(), crate::toolbar::ToolbarKind::ALL.len());
    }

    #[test]
    fn test_bold_toggles_button_state() {
        let mut editor = editor("<p>word</p>");
        editor.surface_mut().select_text("word");

        editor.dispatch(&ToolbarAction::Bold).unwrap();
        assert!(editor.buttons().bold);
        assert_eq!(editor.content(), "<p><b>word</b></p>");

        editor.dispatch(&ToolbarAction::Bold).unwrap();
        assert!(!editor.buttons().bold);
        assert_eq!(editor.content(), "<p>word</p>");

        editor.dispatch(&ToolbarAction::Underline).unwrap();
        assert!(editor.buttons().underline);
        assert!(!editor.buttons().italic);
    }

    #[test]
    fn test_valued_commands_pass_their_value() {
        let mut editor = editor("<p>word</p>");
        editor.surface_mut().select_text("word");
        editor
            .dispatch(&ToolbarAction::TextColor("#ff0000".into()))
            .unwrap();
        editor.dispatch(&ToolbarAction::Heading2).unwrap();
        assert_eq!(
            editor.surface().command_log(),
            &[
                (FormattingCommand::ForeColor, Some("#ff0000".to_string())),
                (FormattingCommand::FormatBlock, Some("<h2>".to_string())),
            ]
        );
        assert_eq!(editor.content(), r##"<h2><font color="#ff0000">word</font></h2>"##);
    }

    #[test]
    fn test_empty_link_and_image_are_ignored() {
        let mut editor = editor("<p>word</p>");
        editor.surface_mut().select_text("word");
        assert_eq!(
            editor.dispatch(&ToolbarAction::InsertLink("  ".into())).unwrap(),
            DispatchOutcome::Ignored
        );
        assert_eq!(
            editor.dispatch(&ToolbarAction::InsertImage(String::new())).unwrap(),
            DispatchOutcome::Ignored
        );
        assert_eq!(editor.content(), "<p>word</p>");
        assert!(editor.surface().command_log().is_empty());
    }

    #[test]
    fn test_link_wraps_selection() {
        let mut editor = editor("<p>word</p>");
        editor.surface_mut().select_text("word");
        editor
            .dispatch(&ToolbarAction::InsertLink("https://example.com".into()))
            .unwrap();
        assert_eq!(
            editor.content(),
            r#"<p><a href="https://example.com">word</a></p>"#
        );
    }

    #[test]
    fn test_image_and_table_are_appended() {
        let mut editor = editor("<p>x</p>");
        editor
            .dispatch(&ToolbarAction::InsertImage("cat.png".into()))
            .unwrap();
        editor
            .dispatch(&ToolbarAction::InsertTable { rows: 1, cols: 2 })
            .unwrap();
        let content = editor.content();
        assert!(content.starts_with(r#"<p>x</p><img src="cat.png" alt="Image""#));
        assert!(content.ends_with("</td></tr></table>"));
        assert_eq!(content.matches("<td ").count(), 2);
    }

    #[test]
    fn test_zero_table_is_notified_not_inserted() {
        let mut editor = editor("<p>x</p>");
        let outcome = editor.handle(&ToolbarAction::InsertTable { rows: 0, cols: 4 });
        assert_eq!(outcome, None);
        assert_eq!(editor.content(), "<p>x</p>");
        assert_eq!(
            editor.notifier().last().as_deref(),
            Some("invalid table size 0x4")
        );
    }

    #[test]
    fn test_huge_table_is_notified_not_inserted() {
        let mut editor = editor("<p>x</p>");
        let action = crate::toolbar::ToolbarKind::InsertTable
            .into_action(Some("4000000000000x4000000000000"), PdfMode::Html)
            .unwrap();
        assert_eq!(editor.handle(&action), None);
        assert_eq!(editor.content(), "<p>x</p>");
        let message = editor.notifier().last().unwrap();
        assert!(message.starts_with("invalid table size"), "{message}");
    }

    #[test]
    fn test_reset_installs_placeholder() {
        let mut editor = editor("<h1>lots</h1><p>of text</p>");
        editor.dispatch(&ToolbarAction::Reset).unwrap();
        assert_eq!(editor.content(), "<p>Start typing here...</p>");
    }

    #[test]
    fn test_copy_text_selects_everything() {
        let mut editor = editor("<p>one</p><p>two</p>");
        editor.dispatch(&ToolbarAction::CopyText).unwrap();
        assert_eq!(editor.surface().clipboard(), Some("onetwo"));
    }

    #[test]
    fn test_preview_and_doc_export() {
        let mut editor = editor("<p>hi</p>");
        assert_eq!(
            editor.dispatch(&ToolbarAction::Preview).unwrap(),
            DispatchOutcome::Preview("<html><body><p>hi</p></body></html>".into())
        );
        let DispatchOutcome::ExportDoc(doc) = editor.dispatch(&ToolbarAction::ExportDoc).unwrap()
        else {
            panic!("expected doc export");
        };
        assert_eq!(doc.file_name, "document.doc");
        assert_eq!(doc.mime, "application/msword");
        assert_eq!(doc.body, "<p>hi</p>");
    }

    #[test]
    fn test_pdf_export_requests() {
        let mut editor = editor(r#"<p>a</p><p>b<img src="x.png"></p>"#);
        let DispatchOutcome::ExportPdf(request) = editor
            .dispatch(&ToolbarAction::ExportPdf(PdfMode::Plain))
            .unwrap()
        else {
            panic!("expected pdf export");
        };
        assert_eq!(request.file_name(), "document.pdf");
        let PdfRequest::Plain { plan, .. } = request else {
            panic!("expected plain request");
        };
        assert_eq!(plan.text, "a\nb");
        assert_eq!(plan.images, vec!["x.png".to_string()]);

        let DispatchOutcome::ExportPdf(request) = editor
            .dispatch(&ToolbarAction::ExportPdf(PdfMode::Html))
            .unwrap()
        else {
            panic!("expected pdf export");
        };
        assert_eq!(request.mode(), PdfMode::Html);
    }

    #[test]
    fn test_painter_through_toolbar_and_selection() {
        let mut editor = editor(r#"<p><i>src</i> dst</p>"#);
        editor.surface_mut().select_text("src");
        assert_eq!(
            editor.dispatch(&ToolbarAction::FormatPainter).unwrap(),
            DispatchOutcome::Painter(CaptureOutcome::Captured)
        );
        assert!(editor.painter().is_active());

        editor.surface_mut().select_text("dst");
        assert_eq!(editor.selection_finished(), ApplyOutcome::Wrapped);
        assert!(!editor.painter().is_active());
        assert_eq!(editor.notifier().last().as_deref(), Some(MSG_APPLIED));

        // selection release while idle does nothing
        editor.surface_mut().select_text("src");
        let before = editor.content();
        assert_eq!(editor.selection_finished(), ApplyOutcome::Inactive);
        assert_eq!(editor.content(), before);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut editor = editor("");
        assert_eq!(
            editor.dispatch(&ToolbarAction::ToggleTheme).unwrap(),
            DispatchOutcome::Theme(Theme::Dark)
        );
        assert_eq!(
            editor.store().get("wordpad:theme").unwrap().as_deref(),
            Some("dark")
        );

        let mut reopened = Wordpad::new(
            MemorySurface::new(""),
            editor.store().clone(),
            RecordingNotifier::new(),
            EditorConfig::default(),
        );
        assert_eq!(reopened.start(), Theme::Dark);
    }

    #[test]
    fn test_start_restores_draft() {
        let mut store = MemoryStore::new();
        store.set("wordpad:autosave", "<p>saved draft</p>").unwrap();
        let mut editor = Wordpad::new(
            MemorySurface::new("<p>Start typing here...</p>"),
            store,
            RecordingNotifier::new(),
            EditorConfig::default(),
        );
        assert_eq!(editor.start(), Theme::Light);
        assert_eq!(editor.content(), "<p>saved draft</p>");
    }

    #[test]
    fn test_manual_save_and_tick() {
        let mut editor = editor("<p>draft</p>");
        assert_eq!(
            editor.dispatch(&ToolbarAction::Save).unwrap(),
            DispatchOutcome::Saved
        );
        assert_eq!(
            editor.store().get("wordpad:autosave").unwrap().as_deref(),
            Some("<p>draft</p>")
        );

        let now = Instant::now();
        let due = now + Duration::from_secs(6);
        assert!(editor.autosave_tick(due).unwrap());
        assert!(!editor.autosave_tick(due + Duration::from_secs(1)).unwrap());
    }

    #[test]
    fn test_failed_save_notifies() {
        let mut editor = Wordpad::new(
            MemorySurface::new("<p>x</p>"),
            MemoryStore::failing(),
            RecordingNotifier::new(),
            EditorConfig::default(),
        );
        assert_eq!(editor.handle(&ToolbarAction::Save), None);
        let message = editor.notifier().last().unwrap_or_default();
        assert!(message.starts_with("storage error"), "{message}");
        assert_eq!(editor.content(), "<p>x</p>");
    }
}
