//! File downloads and PDF rendering with jsPDF.
//!
//! jsPDF is loaded by the page as the UMD bundle, which exposes the
//! constructor as `window.jspdf.jsPDF`.

use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlDocument, HtmlElement, Url};
use wordpad_core::{DocExport, EditorError, HtmlPdfOptions, PdfLayout, PdfRequest, PlainPdfPlan};

use crate::{document, js_message, window};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = jspdf, js_name = jsPDF)]
    #[derive(Debug, Clone)]
    type JsPdf;

    #[wasm_bindgen(constructor, js_namespace = jspdf, js_class = "jsPDF", catch)]
    fn new() -> Result<JsPdf, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn html(this: &JsPdf, source: &HtmlElement, options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = splitTextToSize)]
    fn split_text_to_size(this: &JsPdf, text: &str, width: f64) -> Array;

    #[wasm_bindgen(method)]
    fn text(this: &JsPdf, lines: &Array, x: f64, y: f64);

    #[wasm_bindgen(method, js_name = addImage, catch)]
    fn add_image(
        this: &JsPdf,
        src: &str,
        format: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn save(this: &JsPdf, file_name: &str);
}

fn export_error(err: JsValue) -> EditorError {
    EditorError::Export(js_message(&err))
}

/// Offer `contents` as a file download.
pub fn download(file_name: &str, mime: &str, contents: &str) -> Result<(), EditorError> {
    let parts = Array::new();
    parts.push(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(export_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(export_error)?;

    let link = document()?
        .create_element("a")
        .map_err(export_error)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| EditorError::Export("anchor is not an HtmlAnchorElement".into()))?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();

    Url::revoke_object_url(&url).map_err(export_error)?;
    tracing::info!(file_name, bytes = contents.len(), "download started");
    Ok(())
}

pub fn download_doc(export: &DocExport) -> Result<(), EditorError> {
    download(&export.file_name, export.mime, &export.body)
}

fn jspdf_loaded() -> bool {
    let Ok(window) = window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str("jspdf"))
        .map(|ns| !ns.is_undefined() && !ns.is_null())
        .unwrap_or(false)
}

fn new_pdf() -> Result<JsPdf, EditorError> {
    if !jspdf_loaded() {
        return Err(EditorError::Export("jsPDF is not loaded".into()));
    }
    JsPdf::new().map_err(export_error)
}

/// Render a PDF export. `source` is the live editor element, used by the
/// HTML renderer.
pub fn export_pdf(request: &PdfRequest, source: &HtmlElement) -> Result<(), EditorError> {
    match request {
        PdfRequest::Html { file_name, layout } => render_html(source, file_name, layout),
        PdfRequest::Plain {
            file_name,
            layout,
            plan,
        } => render_plain(plan, file_name, layout),
    }
}

fn render_html(source: &HtmlElement, file_name: &str, layout: &PdfLayout) -> Result<(), EditorError> {
    let pdf = new_pdf()?;
    let window_width = window()?
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(layout.content_width);
    let options = serde_wasm_bindgen::to_value(&HtmlPdfOptions::new(layout, window_width))
        .map_err(|e| EditorError::Export(e.to_string()))?;

    // jsPDF renders asynchronously and hands the document to `callback`.
    let file_name = file_name.to_string();
    let callback = Closure::once_into_js(move |doc: JsPdf| {
        doc.save(&file_name);
        tracing::info!(%file_name, "pdf saved");
    });
    Reflect::set(&options, &JsValue::from_str("callback"), &callback).map_err(export_error)?;

    pdf.html(source, &options).map_err(export_error)?;
    Ok(())
}

fn render_plain(plan: &PlainPdfPlan, file_name: &str, layout: &PdfLayout) -> Result<(), EditorError> {
    let pdf = new_pdf()?;
    let lines = pdf.split_text_to_size(&plan.text, layout.content_width);
    pdf.text(&lines, layout.margin_x, layout.margin_y);

    for image in plan.place_images(lines.length() as usize, layout) {
        // A broken image skips that image, not the export.
        if let Err(err) = pdf.add_image(
            &image.src,
            image_format(&image.src),
            image.x,
            image.y,
            image.width,
            image.height,
        ) {
            tracing::warn!(src = %image.src, error = %js_message(&err), "skipping image");
        }
    }

    pdf.save(file_name);
    tracing::info!(file_name, images = plan.images.len(), "pdf saved");
    Ok(())
}

/// jsPDF image format from a URL or data URL.
fn image_format(src: &str) -> &'static str {
    let lower = src.to_ascii_lowercase();
    if lower.starts_with("data:image/png") || lower.split(['?', '#']).next().is_some_and(|p| p.ends_with(".png")) {
        "PNG"
    } else if lower.starts_with("data:image/webp") || lower.ends_with(".webp") {
        "WEBP"
    } else {
        "JPEG"
    }
}

/// Open a preview window showing `document_markup`.
pub fn open_preview(document_markup: &str) -> Result<(), EditorError> {
    let preview = window()?
        .open_with_url_and_target_and_features("", "Preview", "width=600,height=400")
        .map_err(|e| EditorError::Platform(js_message(&e)))?
        .ok_or_else(|| EditorError::Platform("preview window was blocked".into()))?;
    let doc = preview
        .document()
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
        .ok_or_else(|| EditorError::Platform("preview window has no document".into()))?;
    doc.write(&Array::of1(&JsValue::from_str(document_markup)))
        .map_err(|e| EditorError::Platform(js_message(&e)))?;
    doc.close().map_err(|e| EditorError::Platform(js_message(&e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_format() {
        assert_eq!(image_format("https://x/cat.PNG"), "PNG");
        assert_eq!(image_format("https://x/cat.png?size=2"), "PNG");
        assert_eq!(image_format("data:image/png;base64,AAAA"), "PNG");
        assert_eq!(image_format("photo.jpg"), "JPEG");
        assert_eq!(image_format("pic.webp"), "WEBP");
    }
}
