//! Error types for editor operations.

use miette::Diagnostic;
use smol_str::SmolStr;

/// Main error type for editor operations.
///
/// None of these are fatal to the editor: callers log them and surface a
/// notification, leaving document state as it was.
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum EditorError {
    /// Key-value store read or write failed.
    #[error("storage error: {0}")]
    #[diagnostic(code(wordpad::storage))]
    Storage(String),

    /// The platform rejected or does not support a formatting command.
    #[error("command `{command}` failed: {reason}")]
    #[diagnostic(code(wordpad::command))]
    Command { command: SmolStr, reason: String },

    /// Table insertion requested with a zero dimension or too many cells.
    #[error("invalid table size {rows}x{cols}")]
    #[diagnostic(
        code(wordpad::table),
        help("rows and columns must both be at least 1, with at most 10000 cells")
    )]
    InvalidTableSize { rows: usize, cols: usize },

    /// Export could not produce an artifact.
    #[error("export failed: {0}")]
    #[diagnostic(code(wordpad::export))]
    Export(String),

    /// Configuration could not be parsed.
    #[error(transparent)]
    #[diagnostic(code(wordpad::config))]
    Config(#[from] serde_json::Error),

    /// Any other platform (DOM, JS) failure.
    #[error("platform error: {0}")]
    #[diagnostic(code(wordpad::platform))]
    Platform(String),
}

impl EditorError {
    pub fn command(command: impl Into<SmolStr>, reason: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// Why a selection could not be wrapped in a container.
///
/// `PartialSelection` is the expected structural case and drives the format
/// painter's command fallback.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WrapError {
    /// The range partially selects an element (starts inside one element and
    /// ends inside another that does not contain it).
    #[error("selection partially selects an element")]
    PartialSelection,

    /// There is no selection to wrap.
    #[error("no selection")]
    NoSelection,

    /// The platform failed for another reason.
    #[error("platform error: {0}")]
    Platform(String),
}
