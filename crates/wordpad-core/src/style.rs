//! Style properties and the snapshot captured by the format painter.
//!
//! A `StyleSnapshot` holds exactly the eight properties the painter knows how
//! to copy. Each slot is either a resolved value or absent; values that are
//! empty, `initial` or `none` never make it into a snapshot.

use smol_str::SmolStr;

use crate::types::ContainerSpec;

/// The style properties copied by the format painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    FontWeight,
    FontStyle,
    TextDecorationLine,
    FontSize,
    FontFamily,
    Color,
    BackgroundColor,
    TextAlign,
}

impl StyleProperty {
    /// Every property, in the order they are written into a style attribute.
    pub const ALL: [StyleProperty; 8] = [
        StyleProperty::FontWeight,
        StyleProperty::FontStyle,
        StyleProperty::TextDecorationLine,
        StyleProperty::FontSize,
        StyleProperty::FontFamily,
        StyleProperty::Color,
        StyleProperty::BackgroundColor,
        StyleProperty::TextAlign,
    ];

    /// The CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::FontWeight => "font-weight",
            Self::FontStyle => "font-style",
            Self::TextDecorationLine => "text-decoration-line",
            Self::FontSize => "font-size",
            Self::FontFamily => "font-family",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::TextAlign => "text-align",
        }
    }

    /// Parse a CSS property name. Shorthands that the painter cares about
    /// (`text-decoration`, `background`) resolve to their longhand.
    pub fn from_css_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "font-weight" => Some(Self::FontWeight),
            "font-style" => Some(Self::FontStyle),
            "text-decoration-line" | "text-decoration" => Some(Self::TextDecorationLine),
            "font-size" => Some(Self::FontSize),
            "font-family" => Some(Self::FontFamily),
            "color" => Some(Self::Color),
            "background-color" | "background" => Some(Self::BackgroundColor),
            "text-align" => Some(Self::TextAlign),
            _ => None,
        }
    }

    /// Whether the property inherits from the parent element when unset.
    pub fn is_inherited(self) -> bool {
        !matches!(self, Self::TextDecorationLine | Self::BackgroundColor)
    }

    fn index(self) -> usize {
        match self {
            Self::FontWeight => 0,
            Self::FontStyle => 1,
            Self::TextDecorationLine => 2,
            Self::FontSize => 3,
            Self::FontFamily => 4,
            Self::Color => 5,
            Self::BackgroundColor => 6,
            Self::TextAlign => 7,
        }
    }
}

/// Whether a resolved value is worth copying.
pub fn is_meaningful(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "initial" && value != "none"
}

/// Resolved values for the eight painter properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSnapshot {
    values: [Option<SmolStr>; 8],
}

impl StyleSnapshot {
    /// Capture a snapshot by reading each property through `read`.
    pub fn capture<F>(mut read: F) -> Self
    where
        F: FnMut(StyleProperty) -> Option<String>,
    {
        let mut snapshot = Self::default();
        for property in StyleProperty::ALL {
            if let Some(value) = read(property) {
                snapshot.set(property, &value);
            }
        }
        snapshot
    }

    /// Set a property. Values failing `is_meaningful` clear the slot.
    pub fn set(&mut self, property: StyleProperty, value: &str) {
        self.values[property.index()] = if is_meaningful(value) {
            Some(SmolStr::new(value.trim()))
        } else {
            None
        };
    }

    pub fn get(&self, property: StyleProperty) -> Option<&str> {
        self.values[property.index()].as_deref()
    }

    /// Present properties in `StyleProperty::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &str)> + '_ {
        StyleProperty::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    /// Number of present properties.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The inline container the painter wraps a selection in.
    pub fn to_container(&self) -> ContainerSpec {
        let mut container = ContainerSpec::new("span");
        for (property, value) in self.iter() {
            container = container.with_style(property, value);
        }
        container
    }
}

/// Serialize declarations as a `style` attribute value.
pub fn style_attribute<'a, I>(declarations: I) -> String
where
    I: IntoIterator<Item = (StyleProperty, &'a str)>,
{
    let mut out = String::new();
    for (property, value) in declarations {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(property.css_name());
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

/// Parse an inline `style` attribute into raw `(name, value)` declarations.
///
/// Names are lowercased. Empty declarations are dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name, value.to_string()))
            }
        })
        .collect()
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("blue", (0, 0, 255)),
    ("yellow", (255, 255, 0)),
    ("orange", (255, 165, 0)),
    ("purple", (128, 0, 128)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("silver", (192, 192, 192)),
    ("navy", (0, 0, 128)),
    ("teal", (0, 128, 128)),
    ("maroon", (128, 0, 0)),
    ("olive", (128, 128, 0)),
    ("aqua", (0, 255, 255)),
    ("fuchsia", (255, 0, 255)),
];

/// Normalize a CSS color to the `rgb(r, g, b)` form browsers report for
/// computed colors. Unknown forms are returned trimmed and unchanged.
pub fn normalize_color(value: &str) -> String {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if lower == "transparent" {
        return "rgba(0, 0, 0, 0)".to_string();
    }
    if let Some((_, (r, g, b))) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
        return format!("rgb({}, {}, {})", r, g, b);
    }
    if let Some(hex) = lower.strip_prefix('#') {
        if let Some((r, g, b)) = parse_hex(hex) {
            return format!("rgb({}, {}, {})", r, g, b);
        }
    }
    if let Some(inner) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|s| s.strip_suffix(')'))
    {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [r, g, b] => return format!("rgb({}, {}, {})", r, g, b),
            [r, g, b, a] if *a == "1" => return format!("rgb({}, {}, {})", r, g, b),
            [r, g, b, a] => return format!("rgba({}, {}, {}, {})", r, g, b, a),
            _ => {}
        }
    }
    value.to_string()
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    match hex.len() {
        3 => Some((digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        _ => None,
    }
}

/// Normalize a `font-weight` value to its numeric form.
pub fn normalize_font_weight(value: &str) -> String {
    match value.trim().to_ascii_lowercase().as_str() {
        "bold" | "bolder" => "700".to_string(),
        "normal" | "lighter" => "400".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_filters_empty_initial_none() {
        let snapshot = StyleSnapshot::capture(|p| match p {
            StyleProperty::FontWeight => Some("700".into()),
            StyleProperty::FontStyle => Some("initial".into()),
            StyleProperty::TextDecorationLine => Some("none".into()),
            StyleProperty::FontSize => Some("  ".into()),
            StyleProperty::Color => Some("rgb(255, 0, 0)".into()),
            _ => None,
        });

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(StyleProperty::FontWeight), Some("700"));
        assert_eq!(snapshot.get(StyleProperty::Color), Some("rgb(255, 0, 0)"));
        assert_eq!(snapshot.get(StyleProperty::FontStyle), None);
        assert_eq!(snapshot.get(StyleProperty::TextDecorationLine), None);
    }

    #[test]
    fn test_snapshot_only_reads_the_eight_properties() {
        let mut asked = Vec::new();
        let snapshot = StyleSnapshot::capture(|p| {
            asked.push(p);
            Some("x".into())
        });
        assert_eq!(asked, StyleProperty::ALL.to_vec());
        assert_eq!(snapshot.len(), 8);
    }

    #[test]
    fn test_style_attribute_order() {
        let mut snapshot = StyleSnapshot::default();
        snapshot.set(StyleProperty::Color, "rgb(0, 0, 255)");
        snapshot.set(StyleProperty::FontWeight, "700");
        assert_eq!(
            style_attribute(snapshot.iter()),
            "font-weight: 700; color: rgb(0, 0, 255);"
        );
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("red"), "rgb(255, 0, 0)");
        assert_eq!(normalize_color("#00f"), "rgb(0, 0, 255)");
        assert_eq!(normalize_color("#1A2b3C"), "rgb(26, 43, 60)");
        assert_eq!(normalize_color("rgb(1,2,3)"), "rgb(1, 2, 3)");
        assert_eq!(normalize_color("rgba(1,2,3,0.5)"), "rgba(1, 2, 3, 0.5)");
        assert_eq!(normalize_color("transparent"), "rgba(0, 0, 0, 0)");
        assert_eq!(normalize_color("hsl(0, 100%, 50%)"), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_parse_declarations() {
        let decls = parse_declarations("color:red; Font-Weight : bold;;bad");
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "red".to_string()),
                ("font-weight".to_string(), "bold".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_css_name_shorthands() {
        assert_eq!(
            StyleProperty::from_css_name("text-decoration"),
            Some(StyleProperty::TextDecorationLine)
        );
        assert_eq!(
            StyleProperty::from_css_name("background"),
            Some(StyleProperty::BackgroundColor)
        );
        assert_eq!(StyleProperty::from_css_name("margin"), None);
    }
}
