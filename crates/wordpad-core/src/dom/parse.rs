//! Lenient markup parsing and serialization for `Dom`.

use markdown_weaver_escape::{escape_html, escape_html_body_text};

use super::{Dom, NodeId, NodeKind, VOID_TAGS};

struct StartTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
    len: usize,
}

impl Dom {
    /// Parse markup into a new tree. Never fails: unknown constructs are kept
    /// as text, unclosed elements are closed at the end of input.
    pub fn parse(markup: &str) -> Self {
        let mut dom = Self::new();
        let root = dom.root();
        dom.parse_into(root, markup);
        dom
    }

    /// Parse markup and append the resulting nodes to `parent`.
    pub fn parse_into(&mut self, parent: NodeId, markup: &str) {
        let mut stack = vec![parent];
        let mut rest = markup;

        while !rest.is_empty() {
            let top = stack.last().copied().unwrap_or(parent);

            if let Some(after) = rest.strip_prefix("<!--") {
                rest = after.find("-->").map(|i| &after[i + 3..]).unwrap_or("");
                continue;
            }

            if let Some(after) = rest.strip_prefix("</") {
                if let Some(end) = after.find('>') {
                    let name = after[..end].trim().to_ascii_lowercase();
                    if let Some(pos) = stack
                        .iter()
                        .skip(1)
                        .rposition(|&id| self.tag(id) == Some(name.as_str()))
                    {
                        stack.truncate(pos + 1);
                    }
                    rest = &after[end + 1..];
                    continue;
                }
            }

            if rest.starts_with("<!") {
                if let Some(end) = rest.find('>') {
                    rest = &rest[end + 1..];
                    continue;
                }
            }

            if rest.len() > 1 && rest.as_bytes()[1].is_ascii_alphabetic() && rest.starts_with('<') {
                if let Some(tag) = parse_start_tag(rest) {
                    let id = self.create_element(&tag.name);
                    for (name, value) in tag.attrs {
                        self.set_attr(id, &name, value);
                    }
                    self.append_child(top, id);
                    if !tag.self_closing && !VOID_TAGS.contains(&tag.name.as_str()) {
                        stack.push(id);
                    }
                    rest = &rest[tag.len..];
                    continue;
                }
            }

            // Text runs up to the next '<', always consuming at least one char.
            let first = rest.chars().next().map(char::len_utf8).unwrap_or(1);
            let end = rest[first..].find('<').map(|i| i + first).unwrap_or(rest.len());
            self.append_text(top, &decode_entities(&rest[..end]));
            rest = &rest[end..];
        }
    }

    fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(&last) = self.children(parent).last() {
            if let NodeKind::Text(existing) = &mut self.nodes[last].kind {
                existing.push_str(text);
                return;
            }
        }
        let id = self.create_text(text);
        self.append_child(parent, id);
    }

    /// Serialize the root's children, i.e. the document's inner markup.
    pub fn serialize(&self) -> String {
        self.serialize_children(self.root())
    }

    pub fn serialize_children(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => {
                let _ = escape_html_body_text(&mut *out, text);
            }
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    let _ = escape_html(&mut *out, value);
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    return;
                }
                for &child in self.children(id) {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':' || b == b'_'
}

fn parse_start_tag(input: &str) -> Option<StartTag> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 1;
    while i < len && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = input[1..i].to_ascii_lowercase();
    let mut attrs = Vec::new();

    loop {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= len {
            return None;
        }
        match bytes[i] {
            b'>' => {
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: false,
                    len: i + 1,
                });
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: true,
                    len: i + 2,
                });
            }
            b'/' | b'=' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = i;
        while i < len
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>' | b'/')
        {
            i += 1;
        }
        let attr_name = input[attr_start..i].to_ascii_lowercase();
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if i < len && bytes[i] == b'=' {
            i += 1;
            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let quote = bytes[i];
                i += 1;
                let value_start = i;
                while i < len && bytes[i] != quote {
                    i += 1;
                }
                if i >= len {
                    return None;
                }
                value = decode_entities(&input[value_start..i]);
                i += 1;
            } else {
                let value_start = i;
                while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                    i += 1;
                }
                value = decode_entities(&input[value_start..i]);
            }
        }

        if !attrs.iter().any(|(n, _): &(String, String)| *n == attr_name) {
            attrs.push((attr_name, value));
        }
    }
}

/// Decode the character references the editor and browsers emit.
pub(crate) fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| decode_reference(&after[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serialize_fixed_point() {
        let markup = r#"<p>Hello <b style="color: red;">bold</b> &amp; more</p><img src="a.png" alt="Image">"#;
        let dom = Dom::parse(markup);
        assert_eq!(dom.serialize(), markup);
    }

    #[test]
    fn test_parse_normalizes_quotes_and_case() {
        let dom = Dom::parse("<TABLE border='1'><TR><TD></TD></TR></TABLE>");
        assert_eq!(
            dom.serialize(),
            r#"<table border="1"><tr><td></td></tr></table>"#
        );
    }

    #[test]
    fn test_parse_unclosed_and_stray_close() {
        let dom = Dom::parse("<p>open <i>italic</p>tail</b>");
        assert_eq!(dom.serialize(), "<p>open <i>italic</i></p>tail");
    }

    #[test]
    fn test_parse_skips_comments_and_keeps_lone_lt() {
        let dom = Dom::parse("a <!-- hidden --> b < c");
        assert_eq!(dom.plain_text(), "a  b < c");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("&lt;b&gt; &#65;&#x42; &bogus; &"), "<b> AB &bogus; &");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
    }

    #[test]
    fn test_self_closing_and_void() {
        let dom = Dom::parse("<p>a<br/>b<br>c</p>");
        assert_eq!(dom.serialize(), "<p>a<br>b<br>c</p>");
    }
}
