//! Contenteditable document surface.
//!
//! Formatting goes through `document.execCommand`; wrapping uses
//! `Range.surroundContents`, whose `InvalidStateError` on ranges that
//! partially select a non-text node is reported as
//! `WrapError::PartialSelection`.

use wasm_bindgen::JsCast;
use web_sys::{DomException, Element, HtmlDocument, HtmlElement, Node, Selection};
use wordpad_core::{
    ContainerSpec, DocumentSurface, EditorError, FormattingCommand, SelectionInfo, StyleProperty,
    WrapError,
};

use crate::{document, js_message, platform_error, window};

/// The editor element plus the page document it lives in.
#[derive(Debug, Clone)]
pub struct BrowserSurface {
    element: HtmlElement,
    document: HtmlDocument,
}

impl BrowserSurface {
    pub fn new(element: HtmlElement) -> Result<Self, EditorError> {
        let document = document()?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| EditorError::Platform("document is not an HTML document".into()))?;
        Ok(Self { element, document })
    }

    /// Find the editor element by id and make it editable.
    pub fn from_id(id: &str) -> Result<Self, EditorError> {
        let element = document()?
            .get_element_by_id(id)
            .ok_or_else(|| EditorError::Platform(format!("element #{id} not found")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| EditorError::Platform(format!("#{id} is not an HTML element")))?;
        element.set_content_editable("true");
        Self::new(element)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// The window selection, if it lies inside the editor.
    fn editor_selection(&self) -> Option<Selection> {
        let selection = window().ok()?.get_selection().ok().flatten()?;
        if selection.range_count() == 0 {
            return None;
        }
        let anchor = selection.anchor_node()?;
        self.element.contains(Some(&anchor)).then_some(selection)
    }
}

impl DocumentSurface for BrowserSurface {
    type Node = Node;

    fn content(&self) -> String {
        self.element.inner_html()
    }

    fn set_content(&mut self, markup: &str) {
        self.element.set_inner_html(markup);
    }

    fn append_html(&mut self, markup: &str) -> Result<(), EditorError> {
        self.element
            .insert_adjacent_html("beforeend", markup)
            .map_err(platform_error)
    }

    fn selection(&self) -> Option<SelectionInfo<Node>> {
        let selection = self.editor_selection()?;
        let anchor = selection.anchor_node()?;
        Some(SelectionInfo::new(anchor, selection.is_collapsed()))
    }

    fn element_of(&self, node: &Node) -> Option<Node> {
        if node.node_type() == Node::TEXT_NODE {
            node.parent_element().map(Node::from)
        } else if node.is_instance_of::<Element>() {
            Some(node.clone())
        } else {
            None
        }
    }

    fn computed_style(&self, element: &Node, property: StyleProperty) -> Option<String> {
        let element = element.dyn_ref::<Element>()?;
        let style = window().ok()?.get_computed_style(element).ok().flatten()?;
        style.get_property_value(property.css_name()).ok()
    }

    fn wrap_selection(&mut self, container: &ContainerSpec) -> Result<(), WrapError> {
        let selection = self.editor_selection().ok_or(WrapError::NoSelection)?;
        let range = selection
            .get_range_at(0)
            .map_err(|e| WrapError::Platform(js_message(&e)))?;

        let wrapper = self
            .document
            .create_element(&container.tag)
            .map_err(|e| WrapError::Platform(js_message(&e)))?;
        if !container.styles.is_empty() {
            wrapper
                .set_attribute("style", &container.style_attribute())
                .map_err(|e| WrapError::Platform(js_message(&e)))?;
        }

        range.surround_contents(&wrapper).map_err(|e| {
            match e.dyn_ref::<DomException>().map(|ex| ex.name()) {
                Some(name) if name == "InvalidStateError" => WrapError::PartialSelection,
                _ => WrapError::Platform(js_message(&e)),
            }
        })
    }

    fn execute(
        &mut self,
        command: FormattingCommand,
        value: Option<&str>,
    ) -> Result<(), EditorError> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        if command.takes_value() && value.is_none() {
            return Err(EditorError::command(command.as_str(), "missing value"));
        }
        let accepted = match value {
            Some(value) => self
                .document
                .exec_command_with_show_ui_and_value(command.as_str(), false, value),
            None => self.document.exec_command(command.as_str()),
        }
        .map_err(|e| EditorError::command(command.as_str(), js_message(&e)))?;

        if !accepted {
            return Err(EditorError::command(
                command.as_str(),
                "not supported or not enabled",
            ));
        }
        tracing::debug!(%command, ?value, "execCommand");
        Ok(())
    }

    fn select_all(&mut self) {
        let Some(selection) = window().ok().and_then(|w| w.get_selection().ok().flatten()) else {
            return;
        };
        let Ok(range) = self.document.create_range() else {
            return;
        };
        if range.select_node_contents(&self.element).is_err() {
            return;
        }
        let _ = selection.remove_all_ranges();
        let _ = selection.add_range(&range);
    }

    fn clear_selection(&mut self) {
        if let Some(selection) = self.editor_selection() {
            let _ = selection.remove_all_ranges();
        }
    }
}
