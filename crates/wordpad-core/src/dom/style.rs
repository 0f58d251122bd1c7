//! Computed-style resolution for `Dom` elements.
//!
//! Resolution order per element: inline `style` declarations, then
//! presentational attributes (`<font color>`, `align`, ...), then user-agent
//! defaults for the tag. Inherited properties fall back to the parent's
//! computed value, the rest to the initial value.

use crate::style::{StyleProperty, normalize_color, normalize_font_weight, parse_declarations};

use super::{Dom, NodeId};

/// Initial value reported for a property on the root.
pub fn initial_value(property: StyleProperty) -> &'static str {
    match property {
        StyleProperty::FontWeight => "400",
        StyleProperty::FontStyle => "normal",
        StyleProperty::TextDecorationLine => "none",
        StyleProperty::FontSize => "16px",
        StyleProperty::FontFamily => "serif",
        StyleProperty::Color => "rgb(0, 0, 0)",
        StyleProperty::BackgroundColor => "rgba(0, 0, 0, 0)",
        StyleProperty::TextAlign => "start",
    }
}

/// Pixel size for the legacy `<font size>` / `fontSize` command values.
pub fn legacy_font_size_px(size: &str) -> Option<f64> {
    Some(match size.trim() {
        "1" => 10.0,
        "2" => 13.0,
        "3" => 16.0,
        "4" => 18.0,
        "5" => 24.0,
        "6" => 32.0,
        "7" => 48.0,
        _ => return None,
    })
}

impl Dom {
    /// Resolved value of `property` for a node. Text nodes resolve through
    /// their parent element.
    pub fn computed_style(&self, node: NodeId, property: StyleProperty) -> String {
        let element = if self.is_text(node) {
            match self.parent(node) {
                Some(parent) => parent,
                None => return initial_value(property).to_string(),
            }
        } else {
            node
        };

        match self.declared_style(element, property) {
            Some(value) if property == StyleProperty::FontSize => {
                self.resolve_font_size(element, &value)
            }
            Some(value) if value == "inherit" => self.parent_style(element, property),
            Some(value) => value,
            None if property.is_inherited() => self.parent_style(element, property),
            None => initial_value(property).to_string(),
        }
    }

    fn parent_style(&self, element: NodeId, property: StyleProperty) -> String {
        match self.parent(element) {
            Some(parent) => self.computed_style(parent, property),
            None => initial_value(property).to_string(),
        }
    }

    /// Value declared on the element itself, normalized, if any.
    fn declared_style(&self, element: NodeId, property: StyleProperty) -> Option<String> {
        if let Some(style) = self.attr(element, "style") {
            let declared = parse_declarations(style)
                .into_iter()
                .rev()
                .find(|(name, _)| StyleProperty::from_css_name(name) == Some(property));
            if let Some((_, value)) = declared {
                return Some(normalize_value(property, &value));
            }
        }

        let tag = self.tag(element)?;
        let presentational = match property {
            StyleProperty::Color if tag == "font" => self.attr(element, "color"),
            StyleProperty::FontFamily if tag == "font" => self.attr(element, "face"),
            StyleProperty::FontSize if tag == "font" => self.attr(element, "size"),
            StyleProperty::BackgroundColor => self.attr(element, "bgcolor"),
            StyleProperty::TextAlign => self.attr(element, "align"),
            _ => None,
        };
        if let Some(value) = presentational.filter(|v| !v.trim().is_empty()) {
            if property == StyleProperty::FontSize {
                return legacy_font_size_px(value).map(format_px);
            }
            return Some(normalize_value(property, value));
        }

        tag_default(tag, property).map(str::to_string)
    }

    fn resolve_font_size(&self, element: NodeId, value: &str) -> String {
        let parent_px = || {
            let parent = self.parent_style(element, StyleProperty::FontSize);
            parse_px(&parent).unwrap_or(16.0)
        };
        let value = value.trim().to_ascii_lowercase();

        let px = if let Some(n) = value.strip_suffix("px") {
            n.trim().parse::<f64>().ok()
        } else if let Some(n) = value.strip_suffix("rem") {
            n.trim().parse::<f64>().ok().map(|n| n * 16.0)
        } else if let Some(n) = value.strip_suffix("em") {
            n.trim().parse::<f64>().ok().map(|n| n * parent_px())
        } else if let Some(n) = value.strip_suffix('%') {
            n.trim().parse::<f64>().ok().map(|n| n / 100.0 * parent_px())
        } else if let Some(n) = value.strip_suffix("pt") {
            n.trim().parse::<f64>().ok().map(|n| n * 4.0 / 3.0)
        } else {
            match value.as_str() {
                "xx-small" => Some(9.0),
                "x-small" => Some(10.0),
                "small" => Some(13.0),
                "medium" => Some(16.0),
                "large" => Some(18.0),
                "x-large" => Some(24.0),
                "xx-large" => Some(32.0),
                "smaller" => Some(parent_px() / 1.2),
                "larger" => Some(parent_px() * 1.2),
                "inherit" => Some(parent_px()),
                _ => None,
            }
        };

        match px {
            Some(px) => format_px(px),
            None => value,
        }
    }
}

fn tag_default(tag: &str, property: StyleProperty) -> Option<&'static str> {
    match (property, tag) {
        (StyleProperty::FontWeight, "b" | "strong" | "th" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
            Some("700")
        }
        (StyleProperty::FontStyle, "i" | "em" | "cite" | "var") => Some("italic"),
        (StyleProperty::TextDecorationLine, "u" | "ins" | "a") => Some("underline"),
        (StyleProperty::TextDecorationLine, "s" | "strike" | "del") => Some("line-through"),
        (StyleProperty::FontSize, "h1") => Some("2em"),
        (StyleProperty::FontSize, "h2") => Some("1.5em"),
        (StyleProperty::FontSize, "h3") => Some("1.17em"),
        (StyleProperty::FontSize, "h5") => Some("0.83em"),
        (StyleProperty::FontSize, "h6") => Some("0.67em"),
        (StyleProperty::FontFamily, "code" | "pre" | "kbd" | "tt") => Some("monospace"),
        (StyleProperty::TextAlign, "center") => Some("center"),
        (StyleProperty::Color, "a") => Some("rgb(0, 0, 238)"),
        _ => None,
    }
}

fn normalize_value(property: StyleProperty, value: &str) -> String {
    let value = value.trim();
    match property {
        StyleProperty::Color | StyleProperty::BackgroundColor => normalize_color(value),
        StyleProperty::FontWeight => normalize_font_weight(value),
        StyleProperty::TextDecorationLine => {
            let lines: Vec<&str> = value
                .split_whitespace()
                .filter(|t| matches!(*t, "underline" | "overline" | "line-through"))
                .collect();
            if lines.is_empty() {
                "none".to_string()
            } else {
                lines.join(" ")
            }
        }
        StyleProperty::FontFamily => value.to_string(),
        StyleProperty::FontSize | StyleProperty::FontStyle | StyleProperty::TextAlign => {
            value.to_ascii_lowercase()
        }
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

fn format_px(px: f64) -> String {
    let rounded = (px * 100.0).round() / 100.0;
    format!("{}px", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(dom: &Dom, text: &str) -> NodeId {
        let node = dom
            .text_nodes()
            .into_iter()
            .find(|&n| dom.text(n).is_some_and(|t| t.contains(text)))
            .expect("text present");
        dom.parent(node).expect("attached")
    }

    #[test]
    fn test_tag_defaults_and_inline_style() {
        let dom = Dom::parse(r#"<p><b style="color:red">foo</b> bar</p>"#);
        let b = element(&dom, "foo");
        assert_eq!(dom.computed_style(b, StyleProperty::FontWeight), "700");
        assert_eq!(dom.computed_style(b, StyleProperty::Color), "rgb(255, 0, 0)");
        assert_eq!(dom.computed_style(b, StyleProperty::FontStyle), "normal");

        let p = element(&dom, "bar");
        assert_eq!(dom.computed_style(p, StyleProperty::FontWeight), "400");
        assert_eq!(dom.computed_style(p, StyleProperty::Color), "rgb(0, 0, 0)");
    }

    #[test]
    fn test_inheritance() {
        let dom = Dom::parse(
            r#"<div style="font-family: Georgia; text-align: center; background-color: #ff0"><span>x</span></div>"#,
        );
        let span = element(&dom, "x");
        assert_eq!(dom.computed_style(span, StyleProperty::FontFamily), "Georgia");
        assert_eq!(dom.computed_style(span, StyleProperty::TextAlign), "center");
        // background does not inherit
        assert_eq!(
            dom.computed_style(span, StyleProperty::BackgroundColor),
            "rgba(0, 0, 0, 0)"
        );
    }

    #[test]
    fn test_font_sizes() {
        let dom = Dom::parse(
            r#"<h1>big <span style="font-size: 50%">half</span></h1><font size="5">legacy</font><h3>three</h3>"#,
        );
        assert_eq!(
            dom.computed_style(element(&dom, "big"), StyleProperty::FontSize),
            "32px"
        );
        assert_eq!(
            dom.computed_style(element(&dom, "half"), StyleProperty::FontSize),
            "16px"
        );
        assert_eq!(
            dom.computed_style(element(&dom, "legacy"), StyleProperty::FontSize),
            "24px"
        );
        assert_eq!(
            dom.computed_style(element(&dom, "three"), StyleProperty::FontSize),
            "18.72px"
        );
    }

    #[test]
    fn test_font_element_and_decoration() {
        let dom = Dom::parse(
            r##"<font color="#00f" face="Courier New"><u>under</u></font><s>gone</s>"##,
        );
        let u = element(&dom, "under");
        assert_eq!(dom.computed_style(u, StyleProperty::Color), "rgb(0, 0, 255)");
        assert_eq!(dom.computed_style(u, StyleProperty::FontFamily), "Courier New");
        assert_eq!(
            dom.computed_style(u, StyleProperty::TextDecorationLine),
            "underline"
        );
        assert_eq!(
            dom.computed_style(element(&dom, "gone"), StyleProperty::TextDecorationLine),
            "line-through"
        );
    }
}
