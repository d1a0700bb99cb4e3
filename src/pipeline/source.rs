//! HTML table source: a saved listing page → [`RawRow`]s.
//!
//! The eCourts cause-list page renders the listing as one `<table>`
//! (`#dispTable`). Every `<tr>` under it becomes a row and every direct
//! `<td>` a cell; header cells (`<th>`) are not cells, so a header-only row
//! comes out empty and is dropped by extraction.
//!
//! Cell text approximates what a browser's `innerText` would give: `<br>`
//! and block boundaries become newlines, `<script>`/`<style>` bodies are
//! ignored. Link labels such as "View" stay in the text; stripping them is a
//! column rule, not a source concern.

use crate::error::ExtractionError;
use crate::record::{RawCell, RawRow};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Elements whose boundaries read as line breaks.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Read the rows of the first table matching `selector`.
///
/// # Errors
/// - [`ExtractionError::InvalidSelector`] if `selector` does not parse
/// - [`ExtractionError::TableNotFound`] if nothing in the page matches
pub fn rows_from_html(html: &str, selector: &str) -> Result<Vec<RawRow>, ExtractionError> {
    let table_selector =
        Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
            selector: selector.to_string(),
            detail: e.to_string(),
        })?;
    let row_selector = Selector::parse("tr").map_err(|e| ExtractionError::InvalidSelector {
        selector: "tr".to_string(),
        detail: e.to_string(),
    })?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ExtractionError::TableNotFound {
            selector: selector.to_string(),
        })?;

    let rows: Vec<RawRow> = table.select(&row_selector).map(read_row).collect();
    debug!("Read {} rows from '{}'", rows.len(), selector);
    Ok(rows)
}

fn read_row(row: ElementRef<'_>) -> RawRow {
    let cells = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "td")
        .map(|td| RawCell {
            text: inner_text(td),
            is_spanned: is_spanned(td),
        })
        .collect();
    RawRow::new(cells)
}

/// `colspan="1"` spans nothing; any other value (even a malformed one) is
/// treated as a merged cell.
fn is_spanned(cell: ElementRef<'_>) -> bool {
    cell.value()
        .attr("colspan")
        .is_some_and(|span| span.trim() != "1")
}

fn inner_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            match name {
                "script" | "style" | "template" => {}
                "br" => out.push('\n'),
                _ if BLOCK_ELEMENTS.contains(&name) => {
                    break_line(out);
                    collect_text(child_element, out);
                    break_line(out);
                }
                _ => collect_text(child_element, out),
            }
        }
    }
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
