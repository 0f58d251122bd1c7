//! Platform abstraction traits for editor operations.
//!
//! These traits define the interface between the editor logic and
//! platform-specific implementations (browser DOM, the in-memory surface used
//! in tests). The format painter, toolbar and autosave are written against
//! these traits only.

use crate::commands::FormattingCommand;
use crate::error::{EditorError, WrapError};
use crate::style::StyleProperty;
use crate::types::{ContainerSpec, SelectionInfo};

/// An editable rich-text region.
///
/// The browser implementation is a contenteditable element driven through
/// the Selection API and `execCommand`.
pub trait DocumentSurface {
    /// Handle to a node in the surface's tree.
    type Node: Clone;

    /// Current serialized markup.
    fn content(&self) -> String;

    /// Replace the whole document.
    fn set_content(&mut self, markup: &str);

    /// Append markup after the existing content.
    fn append_html(&mut self, markup: &str) -> Result<(), EditorError>;

    /// The current selection, if the user has one inside the surface.
    fn selection(&self) -> Option<SelectionInfo<Self::Node>>;

    /// Resolve a node to its nearest element. Text nodes resolve to their
    /// parent; elements resolve to themselves.
    fn element_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Resolved (cascaded and inherited) value of a style property.
    fn computed_style(&self, element: &Self::Node, property: StyleProperty) -> Option<String>;

    /// Wrap exactly the selected range in a new container element.
    fn wrap_selection(&mut self, container: &ContainerSpec) -> Result<(), WrapError>;

    /// Run a formatting command against the current selection.
    fn execute(
        &mut self,
        command: FormattingCommand,
        value: Option<&str>,
    ) -> Result<(), EditorError>;

    /// Select the entire document.
    fn select_all(&mut self);

    /// Drop the current selection.
    fn clear_selection(&mut self);
}

/// Persistent string store holding the autosave record and preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, EditorError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), EditorError>;
}

/// Transient user-facing messages.
pub trait Notifier {
    fn notify(&self, message: &str);
}
