//! Export planning: the `.doc` artifact and PDF layouts.
//!
//! Everything here is computed from the document markup alone. The browser
//! crate turns a `DocExport` into a download and a `PlainPdfPlan` into jsPDF
//! calls.

use serde::{Deserialize, Serialize};

use crate::dom::Dom;

pub const DOC_MIME: &str = "application/msword";

/// A word-processor file built from the document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocExport {
    pub file_name: String,
    pub mime: &'static str,
    pub body: String,
}

impl DocExport {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: DOC_MIME,
            body: content.into(),
        }
    }
}

/// How the PDF is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfMode {
    /// Render the live editor element with jsPDF's HTML renderer.
    #[default]
    Html,
    /// Draw extracted text and the document's images directly.
    Plain,
}

impl PdfMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Plain => "plain",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Some(Self::Html),
            "plain" | "text" => Some(Self::Plain),
            _ => None,
        }
    }
}

/// Page geometry in PDF units (millimetres on an A4 page).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfLayout {
    pub margin_x: f64,
    pub margin_y: f64,
    /// Width text is wrapped to, and the HTML renderer's target width.
    pub content_width: f64,
    pub page_width: f64,
    pub line_height: f64,
    /// Images are drawn as squares of this side.
    pub image_size: f64,
    /// Distance between image origins, both across and down.
    pub image_spacing: f64,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            margin_x: 10.0,
            margin_y: 10.0,
            content_width: 180.0,
            page_width: 210.0,
            line_height: 7.0,
            image_size: 50.0,
            image_spacing: 60.0,
        }
    }
}

/// One image on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub src: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Text and image sources for a plain PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainPdfPlan {
    pub text: String,
    pub images: Vec<String>,
}

impl PlainPdfPlan {
    /// Extract text (blocks become lines, entities decoded) and every
    /// non-empty image source, in document order.
    pub fn from_markup(markup: &str) -> Self {
        let dom = Dom::parse(markup);
        let images = dom
            .elements_by_tag("img")
            .into_iter()
            .filter_map(|img| dom.attr(img, "src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            text: dom.plain_text(),
            images,
        }
    }

    /// Place the images below `line_count` lines of wrapped text.
    pub fn place_images(&self, line_count: usize, layout: &PdfLayout) -> Vec<ImagePlacement> {
        let top = layout.margin_y + line_count as f64 * layout.line_height;
        place_images(&self.images, top, layout)
    }
}

/// Lay images out left to right from `top`, starting a new row when the next
/// image would run past the page width.
pub fn place_images(sources: &[String], top: f64, layout: &PdfLayout) -> Vec<ImagePlacement> {
    let mut x = layout.margin_x;
    let mut y = top;
    let mut out = Vec::with_capacity(sources.len());
    for src in sources {
        if x + layout.image_size > layout.page_width && x > layout.margin_x {
            x = layout.margin_x;
            y += layout.image_spacing;
        }
        out.push(ImagePlacement {
            src: src.clone(),
            x,
            y,
            width: layout.image_size,
            height: layout.image_size,
        });
        x += layout.image_spacing;
    }
    out
}

/// A PDF export ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfRequest {
    Html {
        file_name: String,
        layout: PdfLayout,
    },
    Plain {
        file_name: String,
        layout: PdfLayout,
        plan: PlainPdfPlan,
    },
}

impl PdfRequest {
    pub fn mode(&self) -> PdfMode {
        match self {
            Self::Html { .. } => PdfMode::Html,
            Self::Plain { .. } => PdfMode::Plain,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Html { file_name, .. } | Self::Plain { file_name, .. } => file_name,
        }
    }
}

/// Options passed to jsPDF's `html()` renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPdfOptions {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub window_width: f64,
}

impl HtmlPdfOptions {
    pub fn new(layout: &PdfLayout, window_width: f64) -> Self {
        Self {
            x: layout.margin_x,
            y: layout.margin_y,
            width: layout.content_width,
            window_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img{i}.png")).collect()
    }

    #[test]
    fn test_doc_export() {
        let export = DocExport::new("document.doc", "<p>hi</p>");
        assert_eq!(export.mime, "application/msword");
        assert_eq!(export.body, "<p>hi</p>");
        assert_eq!(export.file_name, "document.doc");
    }

    #[test]
    fn test_plain_text_extraction() {
        let plan = PlainPdfPlan::from_markup("<p>a</p><p>b</p>");
        assert_eq!(plan.text, "a\nb");

        let plan = PlainPdfPlan::from_markup("<h1>T &amp; C</h1><p>one<br>two</p>");
        assert_eq!(plan.text, "T & C\none\ntwo");
    }

    #[test]
    fn test_images_collected_in_order() {
        let plan = PlainPdfPlan::from_markup(
            r#"<p>x<img src="a.png"></p><img src=""><img src="b.png" alt="Image">"#,
        );
        assert_eq!(plan.images, vec!["a.png".to_string(), "b.png".to_string()]);
    }

    #[test]
    fn test_image_grid_wraps_rows() {
        let layout = PdfLayout::default();
        let placed = place_images(&sources(4), 30.0, &layout);
        let coords: Vec<(f64, f64)> = placed.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![(10.0, 30.0), (70.0, 30.0), (130.0, 30.0), (10.0, 90.0)]
        );
        assert!(placed.iter().all(|p| p.width == 50.0 && p.height == 50.0));
        assert!(placed.iter().all(|p| p.x + p.width <= layout.page_width));
    }

    #[test]
    fn test_images_start_below_text() {
        let layout = PdfLayout::default();
        let plan = PlainPdfPlan {
            text: "a\nb".into(),
            images: sources(1),
        };
        let placed = plan.place_images(2, &layout);
        assert_eq!(placed[0].y, 10.0 + 2.0 * 7.0);
        assert_eq!(placed[0].x, 10.0);
    }

    #[test]
    fn test_pdf_mode_parse() {
        assert_eq!(PdfMode::parse("HTML"), Some(PdfMode::Html));
        assert_eq!(PdfMode::parse("plain"), Some(PdfMode::Plain));
        assert_eq!(PdfMode::parse("docx"), None);
        assert_eq!(PdfMode::Plain.as_str(), "plain");
    }

    #[test]
    fn test_html_options_serialize_camel_case() {
        let options = HtmlPdfOptions::new(&PdfLayout::default(), 1280.0);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 10.0, "y": 10.0, "width": 180.0, "windowWidth": 1280.0})
        );
    }
}
