//! A small arena-backed markup tree.
//!
//! Used by the in-memory document surface and by export to pull text and
//! images out of serialized content. It understands elements, attributes and
//! text, which is all the editor ever produces; comments and doctypes are
//! skipped when parsing.

mod parse;
mod style;

use std::ops::Range;

use smol_str::SmolStr;

pub use style::{initial_value, legacy_font_size_px};

/// Index of a node in a `Dom`.
pub type NodeId = usize;

/// Elements that never have children or a closing tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "wbr",
];

/// Elements that start a new line in the document flow.
pub const BLOCK_TAGS: &[&str] = &[
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
    "ul",
    "ol",
    "li",
    "table",
    "tr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: SmolStr,
        attrs: Vec<(SmolStr, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Markup tree rooted at a synthetic `body` element.
///
/// Detached nodes stay in the arena; they are simply unreachable from the
/// root.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: 0,
        };
        dom.root = dom.create_element("body");
        dom
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Text(_))
    }

    /// Tag name of an element, lowercased.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// Set or replace an attribute. No-op on text nodes.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id].kind {
            let value = value.into();
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value,
                None => attrs.push((SmolStr::new(name), value)),
            }
        }
    }

    /// Change an element's tag, keeping attributes and children.
    pub fn rename(&mut self, id: NodeId, new_tag: &str) {
        if let NodeKind::Element { tag, .. } = &mut self.nodes[id].kind {
            *tag = SmolStr::new(new_tag.to_ascii_lowercase());
        }
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element {
            tag: SmolStr::new(tag.to_ascii_lowercase()),
            attrs: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Remove a node from its parent. The node keeps its own children.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|&c| c != id);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Insert `child` at `index` among `parent`'s children, clamped to the end.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let index = index.min(self.nodes[parent].children.len());
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.insert(index, child);
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes[id].parent?;
        self.nodes[parent].children.iter().position(|&c| c == id)
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id].parent, move |&n| self.nodes[n].parent)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Deepest node containing both `a` and `b`.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> NodeId {
        std::iter::once(a)
            .chain(self.ancestors(a))
            .find(|&candidate| self.contains(candidate, b))
            .unwrap_or(self.root)
    }

    /// Ancestor of `id` that is a direct child of the root, or `id` itself.
    pub fn top_level(&self, id: NodeId) -> NodeId {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.nodes[n].parent == Some(self.root))
            .unwrap_or(id)
    }

    /// Preorder listing of `id` and its descendants.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node].children.iter().rev().copied());
        }
        out
    }

    /// Attached text nodes in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.is_text(n))
            .collect()
    }

    /// Concatenated text of a subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Length of a text node in chars; 0 for elements.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text(id).map(|t| t.chars().count()).unwrap_or(0)
    }

    /// Split a text node at a char offset.
    ///
    /// The original node keeps the text before the offset; the returned new
    /// node holds the rest and is inserted right after it.
    pub fn split_text(&mut self, id: NodeId, char_offset: usize) -> NodeId {
        let tail = match &mut self.nodes[id].kind {
            NodeKind::Text(text) => {
                let byte = char_to_byte(text, char_offset);
                text.split_off(byte)
            }
            NodeKind::Element { .. } => String::new(),
        };
        let new = self.create_text(tail);
        if let (Some(parent), Some(index)) = (self.nodes[id].parent, self.index_in_parent(id)) {
            self.insert_child(parent, index + 1, new);
        }
        new
    }

    /// Move `parent`'s children in `range` into `wrapper`, and put `wrapper`
    /// where they were.
    pub fn wrap_children(&mut self, parent: NodeId, range: Range<usize>, wrapper: NodeId) {
        let end = range.end.min(self.nodes[parent].children.len());
        let start = range.start.min(end);
        let moved: Vec<NodeId> = self.nodes[parent].children[start..end].to_vec();
        self.insert_child(parent, start, wrapper);
        for child in moved {
            self.append_child(wrapper, child);
        }
    }

    /// Wrap a single node in `wrapper`.
    pub fn wrap_node(&mut self, node: NodeId, wrapper: NodeId) {
        if let (Some(parent), Some(index)) = (self.nodes[node].parent, self.index_in_parent(node)) {
            self.wrap_children(parent, index..index + 1, wrapper);
        }
    }

    /// Replace an element with its children.
    pub fn unwrap(&mut self, id: NodeId) {
        let (Some(parent), Some(index)) = (self.nodes[id].parent, self.index_in_parent(id)) else {
            return;
        };
        let children = std::mem::take(&mut self.nodes[id].children);
        for (offset, child) in children.into_iter().enumerate() {
            self.nodes[child].parent = None;
            self.insert_child(parent, index + offset, child);
        }
        self.detach(id);
    }

    /// Drop empty text nodes and merge adjacent text siblings under `id`.
    pub fn normalize(&mut self, id: NodeId) {
        for node in self.descendants(id) {
            if !self.is_attached(node) || self.is_text(node) {
                continue;
            }
            let mut index = 0;
            while index < self.nodes[node].children.len() {
                let child = self.nodes[node].children[index];
                if self.text(child) == Some("") {
                    self.detach(child);
                    continue;
                }
                if index > 0 {
                    let prev = self.nodes[node].children[index - 1];
                    if self.is_text(prev) && self.is_text(child) {
                        let tail = self.text(child).unwrap_or_default().to_string();
                        if let NodeKind::Text(text) = &mut self.nodes[prev].kind {
                            text.push_str(&tail);
                        }
                        self.detach(child);
                        continue;
                    }
                }
                index += 1;
            }
        }
    }

    /// Plain text with block boundaries as newlines and table cells separated
    /// by tabs.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(self.root, &mut out);
        out.trim_end_matches('\n').to_string()
    }

    fn write_plain_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { tag, .. } => {
                let tag = tag.as_str();
                if tag == "br" {
                    out.push('\n');
                    return;
                }
                let block = BLOCK_TAGS.contains(&tag);
                if block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                if matches!(tag, "td" | "th") && !out.is_empty() && !out.ends_with(['\n', '\t']) {
                    out.push('\t');
                }
                for &child in &self.nodes[id].children {
                    self.write_plain_text(child, out);
                }
                if block && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    /// Attached elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&n| self.tag(n) == Some(tag))
            .collect()
    }
}

/// Byte index of a char offset, clamped to the string length.
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text() {
        let mut dom = Dom::parse("<p>hello world</p>");
        let text = dom.text_nodes()[0];
        let tail = dom.split_text(text, 5);
        assert_eq!(dom.text(text), Some("hello"));
        assert_eq!(dom.text(tail), Some(" world"));
        assert_eq!(dom.index_in_parent(tail), Some(1));
        assert_eq!(dom.serialize(), "<p>hello world</p>");
    }

    #[test]
    fn test_wrap_and_unwrap() {
        let mut dom = Dom::parse("<p>a<i>b</i>c</p>");
        let p = dom.children(dom.root())[0];
        let b = dom.create_element("b");
        dom.wrap_children(p, 0..2, b);
        assert_eq!(dom.serialize(), "<p><b>a<i>b</i></b>c</p>");
        dom.unwrap(b);
        assert_eq!(dom.serialize(), "<p>a<i>b</i>c</p>");
    }

    #[test]
    fn test_common_ancestor() {
        let dom = Dom::parse("<p><i>one</i><u>two</u></p><p>three</p>");
        let texts = dom.text_nodes();
        let p = dom.children(dom.root())[0];
        assert_eq!(dom.common_ancestor(texts[0], texts[1]), p);
        assert_eq!(dom.common_ancestor(texts[0], texts[2]), dom.root());
        assert_eq!(dom.top_level(texts[1]), p);
    }

    #[test]
    fn test_normalize_merges_text() {
        let mut dom = Dom::parse("<p>ab</p>");
        let text = dom.text_nodes()[0];
        let tail = dom.split_text(text, 1);
        dom.split_text(tail, 1);
        assert_eq!(dom.text_nodes().len(), 3);
        dom.normalize(dom.root());
        assert_eq!(dom.text_nodes().len(), 1);
        assert_eq!(dom.serialize(), "<p>ab</p>");
    }

    #[test]
    fn test_plain_text() {
        let dom = Dom::parse("<p>a</p><p>b <b>c</b></p>");
        assert_eq!(dom.plain_text(), "a\nb c");

        let dom = Dom::parse("line<br>next<table><tr><td>x</td><td>y</td></tr></table>");
        assert_eq!(dom.plain_text(), "line\nnext\nx\ty");
    }
}
