//! Core editor types: selection info and wrap containers.
//!
//! These types are platform-agnostic; the node type is whatever the surface
//! uses to identify a position in its tree.

use smol_str::SmolStr;

use crate::style::{StyleProperty, style_attribute};

/// The user's current selection as seen by the format painter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInfo<N> {
    /// Node where the selection started.
    pub anchor: N,
    /// Whether start and end coincide (a caret, not a range).
    pub collapsed: bool,
}

impl<N> SelectionInfo<N> {
    pub fn new(anchor: N, collapsed: bool) -> Self {
        Self { anchor, collapsed }
    }

    /// A selection the painter can act on.
    pub fn is_usable(&self) -> bool {
        !self.collapsed
    }
}

/// Description of an element to wrap a selection in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub tag: SmolStr,
    pub styles: Vec<(StyleProperty, SmolStr)>,
}

impl ContainerSpec {
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            styles: Vec::new(),
        }
    }

    pub fn with_style(mut self, property: StyleProperty, value: impl Into<SmolStr>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    /// The container's inline `style` attribute value.
    pub fn style_attribute(&self) -> String {
        style_attribute(self.styles.iter().map(|(p, v)| (*p, v.as_str())))
    }
}

/// Pressed state of the toggle buttons on the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonStates {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}
