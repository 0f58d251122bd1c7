//! Toolbar actions and their dispatch table.
//!
//! Every control maps to one `ToolbarKind`. `Toolbar::new` registers a
//! handler per kind once; dispatch is a table lookup, never a string match
//! on the hot path.

use std::collections::HashMap;

use smol_str::SmolStr;

use crate::commands::FormattingCommand;
use crate::editor::{DispatchOutcome, Wordpad};
use crate::error::EditorError;
use crate::export::{DocExport, PdfMode, PdfRequest, PlainPdfPlan};
use crate::markup::{image_html, parse_dimension, preview_document, table_html};
use crate::platform::{DocumentSurface, KeyValueStore, Notifier};

/// A toolbar action with its user-supplied value, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Underline,
    Heading1,
    Heading2,
    /// Legacy size 1-7.
    FontSize(SmolStr),
    FontFamily(SmolStr),
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    TextColor(SmolStr),
    HighlightColor(SmolStr),
    OrderedList,
    UnorderedList,
    InsertLink(String),
    InsertImage(String),
    InsertTable { rows: usize, cols: usize },
    ClearFormatting,
    Reset,
    CopyText,
    Preview,
    ExportDoc,
    ExportPdf(PdfMode),
    FormatPainter,
    ToggleTheme,
    Save,
}

impl ToolbarAction {
    pub fn kind(&self) -> ToolbarKind {
        match self {
            Self::Bold => ToolbarKind::Bold,
            Self::Italic => ToolbarKind::Italic,
            Self::Underline => ToolbarKind::Underline,
            Self::Heading1 => ToolbarKind::Heading1,
            Self::Heading2 => ToolbarKind::Heading2,
            Self::FontSize(_) => ToolbarKind::FontSize,
            Self::FontFamily(_) => ToolbarKind::FontFamily,
            Self::AlignLeft => ToolbarKind::AlignLeft,
            Self::AlignCenter => ToolbarKind::AlignCenter,
            Self::AlignRight => ToolbarKind::AlignRight,
            Self::AlignJustify => ToolbarKind::AlignJustify,
            Self::TextColor(_) => ToolbarKind::TextColor,
            Self::HighlightColor(_) => ToolbarKind::HighlightColor,
            Self::OrderedList => ToolbarKind::OrderedList,
            Self::UnorderedList => ToolbarKind::UnorderedList,
            Self::InsertLink(_) => ToolbarKind::InsertLink,
            Self::InsertImage(_) => ToolbarKind::InsertImage,
            Self::InsertTable { .. } => ToolbarKind::InsertTable,
            Self::ClearFormatting => ToolbarKind::ClearFormatting,
            Self::Reset => ToolbarKind::Reset,
            Self::CopyText => ToolbarKind::CopyText,
            Self::Preview => ToolbarKind::Preview,
            Self::ExportDoc => ToolbarKind::ExportDoc,
            Self::ExportPdf(_) => ToolbarKind::ExportPdf,
            Self::FormatPainter => ToolbarKind::FormatPainter,
            Self::ToggleTheme => ToolbarKind::ToggleTheme,
            Self::Save => ToolbarKind::Save,
        }
    }

    /// The value passed along with the platform command.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::FontSize(v) | Self::FontFamily(v) | Self::TextColor(v) | Self::HighlightColor(v) => {
                Some(v.as_str())
            }
            Self::InsertLink(url) | Self::InsertImage(url) => Some(url.as_str()),
            _ => None,
        }
    }
}

/// Toolbar controls without their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarKind {
    Bold,
    Italic,
    Underline,
    Heading1,
    Heading2,
    FontSize,
    FontFamily,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    TextColor,
    HighlightColor,
    OrderedList,
    UnorderedList,
    InsertLink,
    InsertImage,
    InsertTable,
    ClearFormatting,
    Reset,
    CopyText,
    Preview,
    ExportDoc,
    ExportPdf,
    FormatPainter,
    ToggleTheme,
    Save,
}

impl ToolbarKind {
    pub const ALL: [ToolbarKind; 27] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Heading1,
        Self::Heading2,
        Self::FontSize,
        Self::FontFamily,
        Self::AlignLeft,
        Self::AlignCenter,
        Self::AlignRight,
        Self::AlignJustify,
        Self::TextColor,
        Self::HighlightColor,
        Self::OrderedList,
        Self::UnorderedList,
        Self::InsertLink,
        Self::InsertImage,
        Self::InsertTable,
        Self::ClearFormatting,
        Self::Reset,
        Self::CopyText,
        Self::Preview,
        Self::ExportDoc,
        Self::ExportPdf,
        Self::FormatPainter,
        Self::ToggleTheme,
        Self::Save,
    ];

    /// Id of the page element carrying this control.
    pub fn control_id(self) -> &'static str {
        match self {
            Self::Bold => "boldBtn",
            Self::Italic => "italicBtn",
            Self::Underline => "underlineBtn",
            Self::Heading1 => "h1Btn",
            Self::Heading2 => "h2Btn",
            Self::FontSize => "fontSize",
            Self::FontFamily => "fontStyle",
            Self::AlignLeft => "leftAlignBtn",
            Self::AlignCenter => "centerAlignBtn",
            Self::AlignRight => "rightAlignBtn",
            Self::AlignJustify => "justifyAlignBtn",
            Self::TextColor => "textColor",
            Self::HighlightColor => "highlightColor",
            Self::OrderedList => "orderedListBtn",
            Self::UnorderedList => "unorderedListBtn",
            Self::InsertLink => "insertLinkBtn",
            Self::InsertImage => "insertImageBtn",
            Self::InsertTable => "insertTableBtn",
            Self::ClearFormatting => "clearFormattingBtn",
            Self::Reset => "resetBtn",
            Self::CopyText => "copyTextBtn",
            Self::Preview => "previewBtn",
            Self::ExportDoc => "exportDocBtn",
            Self::ExportPdf => "exportPdfBtn",
            Self::FormatPainter => "formatPainterBtn",
            Self::ToggleTheme => "themeToggleBtn",
            Self::Save => "saveBtn",
        }
    }

    pub fn from_control_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.control_id() == id)
    }

    /// Fixed platform command for controls that are a single command.
    pub fn command(self) -> Option<(FormattingCommand, Option<&'static str>)> {
        let command = match self {
            Self::Bold => FormattingCommand::Bold,
            Self::Italic => FormattingCommand::Italic,
            Self::Underline => FormattingCommand::Underline,
            Self::Heading1 => return Some((FormattingCommand::FormatBlock, Some("<h1>"))),
            Self::Heading2 => return Some((FormattingCommand::FormatBlock, Some("<h2>"))),
            Self::FontSize => FormattingCommand::FontSize,
            Self::FontFamily => FormattingCommand::FontName,
            Self::AlignLeft => FormattingCommand::JustifyLeft,
            Self::AlignCenter => FormattingCommand::JustifyCenter,
            Self::AlignRight => FormattingCommand::JustifyRight,
            Self::AlignJustify => FormattingCommand::JustifyFull,
            Self::TextColor => FormattingCommand::ForeColor,
            Self::HighlightColor => FormattingCommand::HiliteColor,
            Self::OrderedList => FormattingCommand::InsertOrderedList,
            Self::UnorderedList => FormattingCommand::InsertUnorderedList,
            Self::InsertLink => FormattingCommand::CreateLink,
            Self::ClearFormatting => FormattingCommand::RemoveFormat,
            _ => return None,
        };
        Some((command, None))
    }

    /// Whether the control needs a value from the user (select, color
    /// input or prompt).
    pub fn takes_value(self) -> bool {
        matches!(
            self,
            Self::FontSize
                | Self::FontFamily
                | Self::TextColor
                | Self::HighlightColor
                | Self::InsertLink
                | Self::InsertImage
                | Self::InsertTable
                | Self::ExportPdf
        )
    }

    /// Build the action for this control.
    ///
    /// `value` is the control's current value or the user's prompt answer.
    /// Tables take `"rows x cols"` (or `"rows,cols"`); PDF export takes a
    /// mode name and defaults to `default_pdf`. Returns `None` when a value
    /// is required but absent or unparseable.
    pub fn into_action(self, value: Option<&str>, default_pdf: PdfMode) -> Option<ToolbarAction> {
        let text = || value.map(str::trim).filter(|v| !v.is_empty());
        Some(match self {
            Self::Bold => ToolbarAction::Bold,
            Self::Italic => ToolbarAction::Italic,
            Self::Underline => ToolbarAction::Underline,
            Self::Heading1 => ToolbarAction::Heading1,
            Self::Heading2 => ToolbarAction::Heading2,
            Self::FontSize => ToolbarAction::FontSize(text()?.into()),
            Self::FontFamily => ToolbarAction::FontFamily(text()?.into()),
            Self::AlignLeft => ToolbarAction::AlignLeft,
            Self::AlignCenter => ToolbarAction::AlignCenter,
            Self::AlignRight => ToolbarAction::AlignRight,
            Self::AlignJustify => ToolbarAction::AlignJustify,
            Self::TextColor => ToolbarAction::TextColor(text()?.into()),
            Self::HighlightColor => ToolbarAction::HighlightColor(text()?.into()),
            Self::OrderedList => ToolbarAction::OrderedList,
            Self::UnorderedList => ToolbarAction::UnorderedList,
            Self::InsertLink => ToolbarAction::InsertLink(value.unwrap_or_default().to_string()),
            Self::InsertImage => ToolbarAction::InsertImage(value.unwrap_or_default().to_string()),
            Self::InsertTable => {
                let (rows, cols) = text()?.split_once(['x', 'X', ','])?;
                ToolbarAction::InsertTable {
                    rows: parse_dimension(rows),
                    cols: parse_dimension(cols),
                }
            }
            Self::ClearFormatting => ToolbarAction::ClearFormatting,
            Self::Reset => ToolbarAction::Reset,
            Self::CopyText => ToolbarAction::CopyText,
            Self::Preview => ToolbarAction::Preview,
            Self::ExportDoc => ToolbarAction::ExportDoc,
            Self::ExportPdf => match text() {
                Some(mode) => ToolbarAction::ExportPdf(PdfMode::parse(mode)?),
                None => ToolbarAction::ExportPdf(default_pdf),
            },
            Self::FormatPainter => ToolbarAction::FormatPainter,
            Self::ToggleTheme => ToolbarAction::ToggleTheme,
            Self::Save => ToolbarAction::Save,
        })
    }
}

pub type Handler<S, K, N> =
    fn(&mut Wordpad<S, K, N>, &ToolbarAction) -> Result<DispatchOutcome, EditorError>;

/// Dispatch table from control to handler.
pub struct Toolbar<S, K, N> {
    handlers: HashMap<ToolbarKind, Handler<S, K, N>>,
}

impl<S, K, N> Toolbar<S, K, N>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    pub fn new() -> Self {
        let mut handlers: HashMap<ToolbarKind, Handler<S, K, N>> = HashMap::new();
        for kind in ToolbarKind::ALL {
            let handler: Handler<S, K, N> = match kind {
                ToolbarKind::Bold | ToolbarKind::Italic | ToolbarKind::Underline => toggle_style,
                ToolbarKind::InsertLink => insert_link,
                ToolbarKind::InsertImage => insert_image,
                ToolbarKind::InsertTable => insert_table,
                ToolbarKind::Reset => reset,
                ToolbarKind::CopyText => copy_text,
                ToolbarKind::Preview => preview,
                ToolbarKind::ExportDoc => export_doc,
                ToolbarKind::ExportPdf => export_pdf,
                ToolbarKind::FormatPainter => format_painter,
                ToolbarKind::ToggleTheme => toggle_theme,
                ToolbarKind::Save => save,
                _ => run_command,
            };
            handlers.insert(kind, handler);
        }
        Self { handlers }
    }

    pub fn handler(&self, kind: ToolbarKind) -> Option<Handler<S, K, N>> {
        self.handlers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S, K, N> Default for Toolbar<S, K, N>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K, N> std::fmt::Debug for Toolbar<S, K, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbar")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

// === Handlers ===

fn run_command<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    let Some((command, fixed)) = action.kind().command() else {
        return Ok(DispatchOutcome::Ignored);
    };
    editor.surface.execute(command, fixed.or(action.value()))?;
    Ok(DispatchOutcome::Applied)
}

fn toggle_style<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    run_command(editor, action)?;
    let buttons = &mut editor.buttons;
    match action {
        ToolbarAction::Bold => buttons.bold = !buttons.bold,
        ToolbarAction::Italic => buttons.italic = !buttons.italic,
        ToolbarAction::Underline => buttons.underline = !buttons.underline,
        _ => {}
    }
    Ok(DispatchOutcome::Applied)
}

fn insert_link<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    match action.value().map(str::trim) {
        Some(url) if !url.is_empty() => {
            editor
                .surface
                .execute(FormattingCommand::CreateLink, Some(url))?;
            Ok(DispatchOutcome::Applied)
        }
        _ => Ok(DispatchOutcome::Ignored),
    }
}

fn insert_image<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    let Some(html) = action.value().and_then(image_html) else {
        return Ok(DispatchOutcome::Ignored);
    };
    editor.surface.append_html(&html)?;
    Ok(DispatchOutcome::Applied)
}

fn insert_table<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    let ToolbarAction::InsertTable { rows, cols } = *action else {
        return Ok(DispatchOutcome::Ignored);
    };
    editor.surface.append_html(&table_html(rows, cols)?)?;
    Ok(DispatchOutcome::Applied)
}

fn reset<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    let placeholder = editor.config.placeholder.clone();
    editor.surface.set_content(&placeholder);
    Ok(DispatchOutcome::Applied)
}

fn copy_text<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    editor.surface.select_all();
    editor.surface.execute(FormattingCommand::Copy, None)?;
    Ok(DispatchOutcome::Applied)
}

fn preview<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    Ok(DispatchOutcome::Preview(preview_document(
        &editor.surface.content(),
    )))
}

fn export_doc<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    Ok(DispatchOutcome::ExportDoc(DocExport::new(
        editor.config.doc_file_name.clone(),
        editor.surface.content(),
    )))
}

fn export_pdf<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    let mode = match action {
        ToolbarAction::ExportPdf(mode) => *mode,
        _ => editor.config.pdf_mode,
    };
    let file_name = editor.config.pdf_file_name.clone();
    let layout = editor.config.pdf;
    let request = match mode {
        PdfMode::Html => PdfRequest::Html { file_name, layout },
        PdfMode::Plain => PdfRequest::Plain {
            file_name,
            layout,
            plan: PlainPdfPlan::from_markup(&editor.surface.content()),
        },
    };
    Ok(DispatchOutcome::ExportPdf(request))
}

fn format_painter<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    let outcome = editor.painter.toggle(&editor.surface, &editor.notifier);
    Ok(DispatchOutcome::Painter(outcome))
}

fn toggle_theme<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    editor.theme = editor.theme.toggled();
    // Apply even if persisting fails.
    if let Err(err) = editor.theme.store(&mut editor.store, &editor.config.theme_key) {
        tracing::warn!(error = %err, "failed to persist theme");
    }
    Ok(DispatchOutcome::Theme(editor.theme))
}

fn save<S, K, N>(
    editor: &mut Wordpad<S, K, N>,
    _action: &ToolbarAction,
) -> Result<DispatchOutcome, EditorError>
where
    S: DocumentSurface,
    K: KeyValueStore,
    N: Notifier,
{
    editor.autosave.save(&editor.surface, &mut editor.store)?;
    Ok(DispatchOutcome::Saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_ids_round_trip() {
        for kind in ToolbarKind::ALL {
            assert_eq!(ToolbarKind::from_control_id(kind.control_id()), Some(kind));
        }
        assert_eq!(ToolbarKind::from_control_id("nope"), None);
    }

    #[test]
    fn test_command_mapping() {
        use FormattingCommand as C;
        let expected = [
            (ToolbarKind::Bold, C::Bold, None),
            (ToolbarKind::Italic, C::Italic, None),
            (ToolbarKind::Underline, C::Underline, None),
            (ToolbarKind::Heading1, C::FormatBlock, Some("<h1>")),
            (ToolbarKind::Heading2, C::FormatBlock, Some("<h2>")),
            (ToolbarKind::FontSize, C::FontSize, None),
            (ToolbarKind::FontFamily, C::FontName, None),
            (ToolbarKind::AlignLeft, C::JustifyLeft, None),
            (ToolbarKind::AlignCenter, C::JustifyCenter, None),
            (ToolbarKind::AlignRight, C::JustifyRight, None),
            (ToolbarKind::AlignJustify, C::JustifyFull, None),
            (ToolbarKind::TextColor, C::ForeColor, None),
            (ToolbarKind::HighlightColor, C::HiliteColor, None),
            (ToolbarKind::OrderedList, C::InsertOrderedList, None),
            (ToolbarKind::UnorderedList, C::InsertUnorderedList, None),
            (ToolbarKind::InsertLink, C::CreateLink, None),
            (ToolbarKind::ClearFormatting, C::RemoveFormat, None),
        ];
        for (kind, command, value) in expected {
            assert_eq!(kind.command(), Some((command, value)), "{kind:?}");
        }
        assert_eq!(ToolbarKind::Reset.command(), None);
    }

    #[test]
    fn test_into_action() {
        let pdf = PdfMode::Html;
        assert_eq!(
            ToolbarKind::FontSize.into_action(Some("5"), pdf),
            Some(ToolbarAction::FontSize("5".into()))
        );
        assert_eq!(ToolbarKind::TextColor.into_action(None, pdf), None);
        assert_eq!(
            ToolbarKind::InsertTable.into_action(Some("2 x 3"), pdf),
            Some(ToolbarAction::InsertTable { rows: 2, cols: 3 })
        );
        assert_eq!(
            ToolbarKind::InsertTable.into_action(Some("2,zero"), pdf),
            Some(ToolbarAction::InsertTable { rows: 2, cols: 0 })
        );
        assert_eq!(
            ToolbarKind::ExportPdf.into_action(None, PdfMode::Plain),
            Some(ToolbarAction::ExportPdf(PdfMode::Plain))
        );
        assert_eq!(
            ToolbarKind::InsertLink.into_action(None, pdf),
            Some(ToolbarAction::InsertLink(String::new()))
        );
    }

    #[test]
    fn test_action_kind_and_value() {
        let action = ToolbarAction::HighlightColor("#ff0".into());
        assert_eq!(action.kind(), ToolbarKind::HighlightColor);
        assert_eq!(action.value(), Some("#ff0"));
        assert_eq!(ToolbarAction::Reset.value(), None);
    }
}
