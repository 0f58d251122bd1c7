//! wordpad-core: platform-neutral logic for a contenteditable rich-text editor.
//!
//! This crate provides:
//! - `DocumentSurface`, `KeyValueStore`, `Notifier` platform traits
//! - `FormatPainter` - computed-style capture and reapply
//! - `Toolbar` dispatch table and the `Wordpad` editor that owns it
//! - `Autosave`, `Theme`, export planning and markup builders
//! - `MemorySurface` and friends, in-memory implementations of the traits

pub mod autosave;
pub mod commands;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod export;
pub mod markup;
pub mod memory;
pub mod painter;
pub mod platform;
pub mod style;
pub mod theme;
pub mod toolbar;
pub mod types;

pub use autosave::{Autosave, AutosaveConfig};
pub use commands::FormattingCommand;
pub use config::EditorConfig;
pub use editor::{DispatchOutcome, Wordpad};
pub use error::{EditorError, WrapError};
pub use export::{DocExport, HtmlPdfOptions, ImagePlacement, PdfLayout, PdfMode, PdfRequest, PlainPdfPlan};
pub use memory::{MemoryStore, MemorySurface, RecordingNotifier};
pub use painter::{ApplyOutcome, CaptureOutcome, FormatPainter, PainterState};
pub use platform::{DocumentSurface, KeyValueStore, Notifier};
pub use smol_str::SmolStr;
pub use style::{StyleProperty, StyleSnapshot};
pub use theme::Theme;
pub use toolbar::{Toolbar, ToolbarAction, ToolbarKind};
pub use types::{ButtonStates, ContainerSpec, SelectionInfo};
