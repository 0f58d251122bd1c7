//! In-memory implementations of the platform traits.
//!
//! `MemorySurface` behaves like a contenteditable element closely enough to
//! exercise the format painter and toolbar without a browser: it resolves
//! computed style, wraps ranges with the same partial-selection rule as
//! `Range.surroundContents`, and applies formatting commands the way
//! `execCommand` does with CSS styling turned off.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::commands::FormattingCommand;
use crate::dom::{Dom, NodeId, char_to_byte, legacy_font_size_px};
use crate::error::{EditorError, WrapError};
use crate::platform::{DocumentSurface, KeyValueStore, Notifier};
use crate::style::StyleProperty;
use crate::types::{ContainerSpec, SelectionInfo};

/// A position in the tree: char offset inside a text node, or child index
/// inside an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

impl Boundary {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// An ordered range (start precedes end in document order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRange {
    pub start: Boundary,
    pub end: Boundary,
}

impl MemoryRange {
    pub fn new(start: Boundary, end: Boundary) -> Self {
        Self { start, end }
    }

    pub fn caret(at: Boundary) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

const INLINE_FORMAT_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "ins", "s", "strike", "del", "font", "span", "sub", "sup",
    "small", "big",
];

const FORMAT_BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "blockquote",
    "pre",
];

/// A document surface backed by a `Dom`.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    dom: Dom,
    selection: Option<MemoryRange>,
    clipboard: Option<String>,
    commands: Vec<(FormattingCommand, Option<String>)>,
}

impl MemorySurface {
    pub fn new(markup: &str) -> Self {
        Self {
            dom: Dom::parse(markup),
            ..Self::default()
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn range(&self) -> Option<MemoryRange> {
        self.selection
    }

    /// Set the selection. A backward range is reordered, as a browser
    /// `Range` would be.
    pub fn set_range(&mut self, range: Option<MemoryRange>) {
        self.selection = range.map(|r| self.ordered(r));
    }

    /// Text most recently copied with the `copy` command.
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Every command executed so far, with its value.
    pub fn command_log(&self) -> &[(FormattingCommand, Option<String>)] {
        &self.commands
    }

    /// First text node containing `needle`, with the char offset of the match.
    pub fn find_text(&self, needle: &str) -> Option<(NodeId, usize)> {
        self.dom.text_nodes().into_iter().find_map(|node| {
            let text = self.dom.text(node)?;
            let byte = text.find(needle)?;
            Some((node, text[..byte].chars().count()))
        })
    }

    /// Select the first occurrence of `needle`. It must lie within one text
    /// node.
    pub fn select_text(&mut self, needle: &str) -> bool {
        let Some((node, offset)) = self.find_text(needle) else {
            return false;
        };
        let len = needle.chars().count();
        self.selection = Some(MemoryRange::new(
            Boundary::new(node, offset),
            Boundary::new(node, offset + len),
        ));
        true
    }

    /// Select from the start of `from` to the end of `to`, which may live in
    /// different text nodes.
    pub fn select_across(&mut self, from: &str, to: &str) -> bool {
        let (Some((start, start_offset)), Some((end, end_offset))) =
            (self.find_text(from), self.find_text(to))
        else {
            return false;
        };
        self.set_range(Some(MemoryRange::new(
            Boundary::new(start, start_offset),
            Boundary::new(end, end_offset + to.chars().count()),
        )));
        true
    }

    /// Put a collapsed caret before the first occurrence of `needle`.
    pub fn place_caret(&mut self, needle: &str) -> bool {
        let Some((node, offset)) = self.find_text(needle) else {
            return false;
        };
        self.selection = Some(MemoryRange::caret(Boundary::new(node, offset)));
        true
    }

    /// Text currently selected.
    pub fn selected_text(&self) -> String {
        self.segments()
            .into_iter()
            .filter_map(|(node, start, end)| {
                let text = self.dom.text(node)?;
                Some(text[char_to_byte(text, start)..char_to_byte(text, end)].to_string())
            })
            .collect()
    }

    // === Range geometry ===

    /// Position of every node in a pre-order walk.
    fn document_order(&self) -> HashMap<NodeId, usize> {
        self.dom
            .descendants(self.dom.root())
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n, i))
            .collect()
    }

    /// `range` with its start no later than its end.
    fn ordered(&self, range: MemoryRange) -> MemoryRange {
        let order = self.document_order();
        let texts = self.dom.text_nodes();
        let start = self.text_point(range.start, &texts, &order);
        let end = self.text_point(range.end, &texts, &order);
        if end < start {
            MemoryRange::new(range.end, range.start)
        } else {
            range
        }
    }

    /// Map a boundary to (index into `texts`, char offset). Element
    /// boundaries map to the start of the next text node in document order.
    fn text_point(&self, boundary: Boundary, texts: &[NodeId], order: &HashMap<NodeId, usize>) -> (usize, usize) {
        if self.dom.is_text(boundary.node) {
            let index = texts
                .iter()
                .position(|&t| t == boundary.node)
                .unwrap_or(texts.len());
            return (index, boundary.offset.min(self.dom.text_len(boundary.node)));
        }

        let children = self.dom.children(boundary.node);
        let threshold = match children.get(boundary.offset) {
            Some(child) => order.get(child).copied().unwrap_or(usize::MAX),
            None => self
                .dom
                .descendants(boundary.node)
                .iter()
                .filter_map(|n| order.get(n))
                .max()
                .map(|last| last + 1)
                .unwrap_or(usize::MAX),
        };
        let index = texts
            .iter()
            .position(|t| order.get(t).is_some_and(|&o| o >= threshold))
            .unwrap_or(texts.len());
        (index, 0)
    }

    /// Selected text runs as (text node, start char, end char).
    fn segments(&self) -> Vec<(NodeId, usize, usize)> {
        let Some(range) = self.selection else {
            return Vec::new();
        };
        let order = self.document_order();
        let texts = self.dom.text_nodes();
        let (start_index, start_offset) = self.text_point(range.start, &texts, &order);
        let (end_index, end_offset) = self.text_point(range.end, &texts, &order);

        let mut out = Vec::new();
        for (index, &node) in texts.iter().enumerate() {
            if index < start_index || index > end_index {
                continue;
            }
            let len = self.dom.text_len(node);
            let from = if index == start_index { start_offset } else { 0 };
            let to = if index == end_index { end_offset } else { len };
            if from < to {
                out.push((node, from, to));
            }
        }
        out
    }

    /// Split text so each selected run is a whole text node, and reselect
    /// those nodes.
    fn isolate_segments(&mut self) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        for (node, from, to) in self.segments() {
            let len = self.dom.text_len(node);
            if to < len {
                self.dom.split_text(node, to);
            }
            let segment = if from > 0 {
                self.dom.split_text(node, from)
            } else {
                node
            };
            nodes.push(segment);
        }
        if let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) {
            self.selection = Some(MemoryRange::new(
                Boundary::new(first, 0),
                Boundary::new(last, self.dom.text_len(last)),
            ));
        }
        nodes
    }

    /// Top-level blocks touched by the selection, in document order.
    fn selected_blocks(&self) -> Vec<NodeId> {
        let Some(range) = self.selection else {
            return Vec::new();
        };
        let root = self.dom.root();
        let mut candidates: Vec<NodeId> = self.segments().into_iter().map(|(n, _, _)| n).collect();
        for boundary in [range.start, range.end] {
            if boundary.node != root {
                candidates.push(boundary.node);
            } else if let Some(&child) = self.dom.children(root).get(boundary.offset) {
                candidates.push(child);
            }
        }

        let mut seen = HashSet::new();
        let mut blocks: Vec<NodeId> = candidates
            .into_iter()
            .filter(|&n| self.dom.is_attached(n) && n != root)
            .map(|n| self.dom.top_level(n))
            .filter(|&b| seen.insert(b))
            .collect();
        blocks.sort_by_key(|&b| self.dom.index_in_parent(b).unwrap_or(usize::MAX));
        blocks
    }

    // === Command helpers ===

    fn wrap_each(&mut self, nodes: &[NodeId], tag: &str, attr: Option<(&str, &str)>) {
        for &node in nodes {
            let wrapper = self.dom.create_element(tag);
            if let Some((name, value)) = attr {
                self.dom.set_attr(wrapper, name, value);
            }
            self.dom.wrap_node(node, wrapper);
        }
    }

    fn nearest_tagged(&self, node: NodeId, tags: &[&str]) -> Option<NodeId> {
        let root = self.dom.root();
        self.dom
            .ancestors(node)
            .take_while(|&a| a != root)
            .find(|&a| self.dom.tag(a).is_some_and(|t| tags.contains(&t)))
    }

    /// Toggle an inline tag: unwrap it when every run already has it,
    /// otherwise wrap every run.
    fn toggle_inline(&mut self, tags: &[&str]) {
        let nodes = self.isolate_segments();
        if nodes.is_empty() {
            return;
        }
        let all_on = nodes
            .iter()
            .all(|&n| self.nearest_tagged(n, tags).is_some());
        if all_on {
            let mut seen = HashSet::new();
            for &node in &nodes {
                if let Some(el) = self.nearest_tagged(node, tags) {
                    if seen.insert(el) {
                        self.dom.unwrap(el);
                    }
                }
            }
        } else {
            self.wrap_each(&nodes, tags[0], None);
        }
    }

    fn remove_format(&mut self) {
        let nodes = self.isolate_segments();
        let mut seen = HashSet::new();
        for &node in &nodes {
            while let Some(el) = self.nearest_tagged(node, INLINE_FORMAT_TAGS) {
                if !seen.insert(el) {
                    break;
                }
                self.dom.unwrap(el);
            }
        }
    }

    fn set_block_style(&mut self, element: NodeId, property: StyleProperty, value: &str) {
        let mut declarations: Vec<(String, String)> = self
            .dom
            .attr(element, "style")
            .map(crate::style::parse_declarations)
            .unwrap_or_default()
            .into_iter()
            .filter(|(name, _)| StyleProperty::from_css_name(name) != Some(property))
            .collect();
        declarations.push((property.css_name().to_string(), value.to_string()));
        let style = declarations
            .iter()
            .map(|(n, v)| format!("{}: {};", n, v))
            .collect::<Vec<_>>()
            .join(" ");
        self.dom.set_attr(element, "style", style);
    }

    fn is_block_element(&self, node: NodeId) -> bool {
        self.dom
            .tag(node)
            .is_some_and(|t| FORMAT_BLOCK_TAGS.contains(&t))
    }

    fn format_block(&mut self, value: &str) {
        let tag = value
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_ascii_lowercase();
        if !FORMAT_BLOCK_TAGS.contains(&tag.as_str()) {
            return;
        }
        for block in self.selected_blocks() {
            if self.is_block_element(block) {
                self.dom.rename(block, &tag);
            } else {
                let wrapper = self.dom.create_element(&tag);
                self.dom.wrap_node(block, wrapper);
            }
        }
    }

    fn justify(&mut self, alignment: &str) {
        for block in self.selected_blocks() {
            let target = if self.is_block_element(block) {
                block
            } else {
                let wrapper = self.dom.create_element("div");
                self.dom.wrap_node(block, wrapper);
                wrapper
            };
            self.set_block_style(target, StyleProperty::TextAlign, alignment);
        }
    }

    fn make_list(&mut self, list_tag: &str) {
        let blocks = self.selected_blocks();
        let Some(&first) = blocks.first() else {
            return;
        };
        let root = self.dom.root();
        let index = self.dom.index_in_parent(first).unwrap_or(0);
        let list = self.dom.create_element(list_tag);
        self.dom.insert_child(root, index, list);

        for block in blocks {
            let item = self.dom.create_element("li");
            self.dom.append_child(list, item);
            if self.is_block_element(block) {
                for child in self.dom.children(block).to_vec() {
                    self.dom.append_child(item, child);
                }
                self.dom.detach(block);
            } else {
                self.dom.append_child(item, block);
            }
        }
    }
}

impl DocumentSurface for MemorySurface {
    type Node = NodeId;

    fn content(&self) -> String {
        self.dom.serialize()
    }

    fn set_content(&mut self, markup: &str) {
        self.dom = Dom::parse(markup);
        self.selection = None;
    }

    fn append_html(&mut self, markup: &str) -> Result<(), EditorError> {
        let root = self.dom.root();
        self.dom.parse_into(root, markup);
        Ok(())
    }

    fn selection(&self) -> Option<SelectionInfo<NodeId>> {
        let range = self.selection?;
        if !self.dom.is_attached(range.start.node) {
            return None;
        }
        Some(SelectionInfo::new(range.start.node, range.is_collapsed()))
    }

    fn element_of(&self, node: &NodeId) -> Option<NodeId> {
        if !self.dom.is_attached(*node) {
            return None;
        }
        if self.dom.is_text(*node) {
            self.dom.parent(*node)
        } else {
            Some(*node)
        }
    }

    fn computed_style(&self, element: &NodeId, property: StyleProperty) -> Option<String> {
        Some(self.dom.computed_style(*element, property))
    }

    fn wrap_selection(&mut self, container: &ContainerSpec) -> Result<(), WrapError> {
        let range = self.selection.ok_or(WrapError::NoSelection)?;
        let (start, end) = (range.start, range.end);
        if !self.dom.is_attached(start.node) || !self.dom.is_attached(end.node) {
            return Err(WrapError::NoSelection);
        }

        let (parent, start_index, end_index) = if start.node == end.node && self.dom.is_text(start.node) {
            let text = start.node;
            let parent = self.dom.parent(text).ok_or(WrapError::NoSelection)?;
            let index = self.dom.index_in_parent(text).unwrap_or(0);
            if end.offset < self.dom.text_len(text) {
                self.dom.split_text(text, end.offset);
            }
            if start.offset > 0 {
                self.dom.split_text(text, start.offset);
                (parent, index + 1, index + 2)
            } else {
                (parent, index, index + 1)
            }
        } else {
            let common = self.dom.common_ancestor(start.node, end.node);

            // A boundary must sit in the common ancestor itself or in one of
            // its text children; any element in between is only partially
            // inside the range.
            for boundary in [start, end] {
                let inside_common = boundary.node == common
                    || (self.dom.is_text(boundary.node)
                        && self.dom.parent(boundary.node) == Some(common));
                if !inside_common {
                    return Err(WrapError::PartialSelection);
                }
            }

            let mut end_index = if end.node == common {
                end.offset
            } else {
                let index = self.dom.index_in_parent(end.node).unwrap_or(0);
                self.dom.split_text(end.node, end.offset);
                index + 1
            };
            let start_index = if start.node == common {
                start.offset
            } else {
                let index = self.dom.index_in_parent(start.node).unwrap_or(0);
                self.dom.split_text(start.node, start.offset);
                if end_index > index {
                    end_index += 1;
                }
                index + 1
            };
            (common, start_index, end_index)
        };

        let wrapper = self.dom.create_element(&container.tag);
        if !container.styles.is_empty() {
            self.dom.set_attr(wrapper, "style", container.style_attribute());
        }
        self.dom.wrap_children(parent, start_index..end_index, wrapper);
        self.dom.normalize(self.dom.root());
        self.selection = Some(MemoryRange::new(
            Boundary::new(wrapper, 0),
            Boundary::new(wrapper, self.dom.children(wrapper).len()),
        ));
        Ok(())
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
        self.commands.push((command, value.map(str::to_string)));
        if self.selection.is_none() {
            return Ok(());
        }
        let value = value.unwrap_or_default();

        match command {
            FormattingCommand::Bold => self.toggle_inline(&["b", "strong"]),
            FormattingCommand::Italic => self.toggle_inline(&["i", "em"]),
            FormattingCommand::Underline => self.toggle_inline(&["u", "ins"]),
            FormattingCommand::FontName => {
                let nodes = self.isolate_segments();
                self.wrap_each(&nodes, "font", Some(("face", value)));
            }
            FormattingCommand::FontSize => {
                if legacy_font_size_px(value).is_none() {
                    return Err(EditorError::command(
                        command.as_str(),
                        format!("font size must be 1-7, got {value}"),
                    ));
                }
                let nodes = self.isolate_segments();
                self.wrap_each(&nodes, "font", Some(("size", value)));
            }
            FormattingCommand::ForeColor => {
                let nodes = self.isolate_segments();
                self.wrap_each(&nodes, "font", Some(("color", value)));
            }
            FormattingCommand::HiliteColor => {
                let nodes = self.isolate_segments();
                let style = format!("background-color: {};", value);
                self.wrap_each(&nodes, "span", Some(("style", &style)));
            }
            FormattingCommand::CreateLink => {
                let nodes = self.isolate_segments();
                self.wrap_each(&nodes, "a", Some(("href", value)));
            }
            FormattingCommand::RemoveFormat => self.remove_format(),
            FormattingCommand::FormatBlock => self.format_block(value),
            FormattingCommand::JustifyLeft
            | FormattingCommand::JustifyCenter
            | FormattingCommand::JustifyRight
            | FormattingCommand::JustifyFull => {
                if let Some(alignment) = command.alignment() {
                    self.justify(alignment);
                }
            }
            FormattingCommand::InsertOrderedList => self.make_list("ol"),
            FormattingCommand::InsertUnorderedList => self.make_list("ul"),
            FormattingCommand::Copy => self.clipboard = Some(self.selected_text()),
        }
        Ok(())
    }

    fn select_all(&mut self) {
        let root = self.dom.root();
        let len = self.dom.children(root).len();
        self.selection = Some(MemoryRange::new(
            Boundary::new(root, 0),
            Boundary::new(root, len),
        ));
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }
}

/// A `HashMap`-backed store. Can be made to fail writes to exercise error
/// paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like a full or disabled localStorage.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, EditorError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EditorError> {
        if self.fail_writes {
            return Err(EditorError::Storage(format!("quota exceeded writing {key}")));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Notifier that records every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> ContainerSpec {
        ContainerSpec::new("span").with_style(StyleProperty::Color, "rgb(255, 0, 0)")
    }

    #[test]
    fn test_wrap_within_text_node() {
        let mut surface = MemorySurface::new("<p>foo bar baz</p>");
        assert!(surface.select_text("bar"));
        surface.wrap_selection(&span()).unwrap();
        assert_eq!(
            surface.content(),
            r#"<p>foo <span style="color: rgb(255, 0, 0);">bar</span> baz</p>"#
        );
    }

    #[test]
    fn test_wrap_whole_text_node() {
        let mut surface = MemorySurface::new("<p>bar</p>");
        assert!(surface.select_text("bar"));
        surface.wrap_selection(&ContainerSpec::new("span")).unwrap();
        assert_eq!(surface.content(), "<p><span>bar</span></p>");
    }

    #[test]
    fn test_wrap_across_siblings_in_same_parent() {
        let mut surface = MemorySurface::new("<p>one <b>two</b> three</p>");
        // "one " and " three" are text children of <p>, <b> is fully inside.
        assert!(surface.select_across("ne", "thr"));
        surface.wrap_selection(&ContainerSpec::new("span")).unwrap();
        assert_eq!(
            surface.content(),
            "<p>o<span>ne <b>two</b> thr</span>ee</p>"
        );
    }

    #[test]
    fn test_wrap_partial_selection_fails() {
        let mut surface = MemorySurface::new("<p><i>one two</i><u>three four</u></p>");
        assert!(surface.select_across("two", "three"));
        let before = surface.content();
        assert_eq!(
            surface.wrap_selection(&span()),
            Err(WrapError::PartialSelection)
        );
        assert_eq!(surface.content(), before);
    }

    #[test]
    fn test_backward_range_is_reordered() {
        let mut surface = MemorySurface::new("<p>foo bar baz</p>");
        let (text, offset) = surface.find_text("bar").unwrap();
        let start = Boundary::new(text, offset);
        let end = Boundary::new(text, offset + 3);

        surface.set_range(Some(MemoryRange::new(end, start)));
        assert_eq!(surface.range(), Some(MemoryRange::new(start, end)));
        assert_eq!(surface.selected_text(), "bar");
        surface.wrap_selection(&ContainerSpec::new("span")).unwrap();
        assert_eq!(surface.content(), "<p>foo <span>bar</span> baz</p>");
    }

    #[test]
    fn test_backward_range_across_nodes() {
        let mut surface = MemorySurface::new("<p><b>src</b> target</p>");
        let (src, _) = surface.find_text("src").unwrap();
        let (target, _) = surface.find_text("target").unwrap();
        let start = Boundary::new(src, 0);
        let end = Boundary::new(target, 7);

        surface.set_range(Some(MemoryRange::new(end, start)));
        assert_eq!(surface.range(), Some(MemoryRange::new(start, end)));
        assert_eq!(surface.selected_text(), "src target");
    }

    #[test]
    fn test_wrap_without_selection() {
        let mut surface = MemorySurface::new("<p>x</p>");
        assert_eq!(surface.wrap_selection(&span()), Err(WrapError::NoSelection));
    }

    #[test]
    fn test_fore_color_across_elements() {
        let mut surface = MemorySurface::new("<p><i>one two</i><u>three four</u></p>");
        assert!(surface.select_across("two", "three"));
        surface
            .execute(FormattingCommand::ForeColor, Some("#00f"))
            .unwrap();
        assert_eq!(
            surface.content(),
            r##"<p><i>one <font color="#00f">two</font></i><u><font color="#00f">three</font> four</u></p>"##
        );
        assert_eq!(surface.selected_text(), "twothree");
    }

    #[test]
    fn test_bold_toggles() {
        let mut surface = MemorySurface::new("<p>plain</p>");
        surface.select_text("plain");
        surface.execute(FormattingCommand::Bold, None).unwrap();
        assert_eq!(surface.content(), "<p><b>plain</b></p>");
        surface.execute(FormattingCommand::Bold, None).unwrap();
        assert_eq!(surface.content(), "<p>plain</p>");
    }

    #[test]
    fn test_format_block_and_justify() {
        let mut surface = MemorySurface::new("<p>title</p><p>body</p>");
        surface.select_text("title");
        surface
            .execute(FormattingCommand::FormatBlock, Some("<h1>"))
            .unwrap();
        surface.execute(FormattingCommand::JustifyCenter, None).unwrap();
        assert_eq!(
            surface.content(),
            r#"<h1 style="text-align: center;">title</h1><p>body</p>"#
        );
    }

    #[test]
    fn test_lists() {
        let mut surface = MemorySurface::new("<p>a</p><p>b</p><p>c</p>");
        surface.select_across("a", "b");
        surface
            .execute(FormattingCommand::InsertUnorderedList, None)
            .unwrap();
        assert_eq!(surface.content(), "<ul><li>a</li><li>b</li></ul><p>c</p>");
    }

    #[test]
    fn test_remove_format() {
        let mut surface = MemorySurface::new(r#"<p><b><font color="red">x</font></b>y</p>"#);
        surface.select_text("x");
        surface.execute(FormattingCommand::RemoveFormat, None).unwrap();
        assert_eq!(surface.content(), "<p>xy</p>");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let mut surface = MemorySurface::new("<p>x</p>");
        surface.select_text("x");
        let err = surface
            .execute(FormattingCommand::ForeColor, None)
            .unwrap_err();
        assert!(matches!(err, EditorError::Command { .. }));
        assert!(surface.command_log().is_empty());
    }

    #[test]
    fn test_select_all_and_copy() {
        let mut surface = MemorySurface::new("<p>a</p><p>b</p>");
        surface.select_all();
        surface.execute(FormattingCommand::Copy, None).unwrap();
        assert_eq!(surface.clipboard(), Some("ab"));
    }

    #[test]
    fn test_element_of_text_is_parent() {
        let mut surface = MemorySurface::new("<p><b>x</b></p>");
        surface.select_text("x");
        let anchor = surface.selection().unwrap().anchor;
        let element = surface.element_of(&anchor).unwrap();
        assert_eq!(surface.dom().tag(element), Some("b"));
    }
}
