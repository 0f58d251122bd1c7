//! Markup fragments the toolbar inserts into the document.

use markdown_weaver_escape::escape_href;

use crate::error::EditorError;

/// Content installed by the reset button.
pub const PLACEHOLDER: &str = "<p>Start typing here...</p>";

/// An image sized to fit the editor width. Returns `None` for an empty URL.
pub fn image_html(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let mut out = String::from("<img src=\"");
    let _ = escape_href(&mut out, url);
    out.push_str("\" alt=\"Image\" style=\"max-width: 100%;\">");
    Some(out)
}

/// Largest table `table_html` will build, in cells.
pub const MAX_TABLE_CELLS: usize = 10_000;

/// A bordered, full-width table of empty centered cells.
pub fn table_html(rows: usize, cols: usize) -> Result<String, EditorError> {
    let cells = rows
        .checked_mul(cols)
        .filter(|&cells| cells > 0 && cells <= MAX_TABLE_CELLS)
        .ok_or(EditorError::InvalidTableSize { rows, cols })?;
    let cell = "<td style=\"padding: 10px; text-align: center;\"></td>";
    // Bounded by MAX_TABLE_CELLS, so this cannot overflow.
    let mut out = String::with_capacity(80 + rows * 9 + cells * cell.len());
    out.push_str("<table border=\"1\" style=\"width: 100%; border-collapse: collapse;\">");
    for _ in 0..rows {
        out.push_str("<tr>");
        for _ in 0..cols {
            out.push_str(cell);
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    Ok(out)
}

/// A standalone document wrapping the editor content, for the preview window.
pub fn preview_document(content: &str) -> String {
    format!("<html><body>{content}</body></html>")
}

/// Parse a user-entered table dimension. Blank or non-numeric input is
/// treated as zero, which `table_html` rejects.
pub fn parse_dimension(input: &str) -> usize {
    input.trim().parse().unwrap_or(0)
}
