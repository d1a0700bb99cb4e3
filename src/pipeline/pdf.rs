//! PDF serialisation: [`DocumentLayout`] → PDF bytes via `lopdf`.
//!
//! Each page becomes one content stream drawn in three passes per row:
//! background fill, cell borders, then text. Borders are stroked per cell
//! so adjacent cells share edges and the grid stays uniform. The two
//! standard Helvetica faces are referenced, not embedded, and declared with
//! `WinAnsiEncoding` to match [`crate::pipeline::font::encode_text`].

use crate::config::{ReportTheme, Rgb};
use crate::error::RenderError;
use crate::pipeline::font::{encode_text, Font};
use crate::pipeline::layout::{DocumentLayout, PageLayout, RowLayout, TextLine};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

/// Serialise a laid-out document. The theme supplies the grid stroke and
/// the Info dictionary title.
pub fn write_pdf(layout: &DocumentLayout, theme: &ReportTheme) -> Result<Vec<u8>, RenderError> {
    let grid = (theme.grid_color, theme.grid_width);
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let fonts = [Font::Helvetica, Font::HelveticaBold].map(|font| {
        let id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        (font.resource_name(), id)
    });
    let mut font_dict = lopdf::Dictionary::new();
    for (name, id) in fonts {
        font_dict.set(name, id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, grid);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => layout.pages.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(layout.page_width),
            Object::Real(layout.page_height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = info_dictionary(&mut doc, &theme.title);
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    debug!(
        "Serialised {} pages into {} bytes",
        layout.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn info_dictionary(doc: &mut Document, title: &str) -> ObjectId {
    let producer = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));
    doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_text(title)),
        "Producer" => Object::string_literal(producer),
    })
}

fn page_content(page: &PageLayout, grid: (Rgb, f32)) -> Content {
    let mut ops = Vec::new();

    if !page.title.is_empty() {
        ops.push(fill_color(Rgb::from_hex(0x000000)));
        for line in &page.title {
            push_text(&mut ops, line, Font::HelveticaBold, page.title_font_size);
        }
    }

    for row in &page.rows {
        push_backgrounds(&mut ops, row);
    }
    push_grid(&mut ops, &page.rows, grid);
    for row in &page.rows {
        push_row_text(&mut ops, row);
    }

    Content { operations: ops }
}

fn push_backgrounds(ops: &mut Vec<Operation>, row: &RowLayout) {
    ops.push(fill_color(row.background));
    for cell in &row.cells {
        ops.push(rect(cell.x, row.top - row.height, cell.width, row.height));
    }
    ops.push(Operation::new("f", vec![]));
}

fn push_grid(ops: &mut Vec<Operation>, rows: &[RowLayout], (color, width): (Rgb, f32)) {
    if width <= 0.0 || rows.is_empty() {
        return;
    }
    let [r, g, b] = color.unit();
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "RG",
        vec![Object::Real(r), Object::Real(g), Object::Real(b)],
    ));
    ops.push(Operation::new("w", vec![Object::Real(width)]));
    for row in rows {
        for cell in &row.cells {
            ops.push(rect(cell.x, row.top - row.height, cell.width, row.height));
        }
    }
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

fn push_row_text(ops: &mut Vec<Operation>, row: &RowLayout) {
    ops.push(fill_color(row.text_color));
    for cell in &row.cells {
        for line in &cell.lines {
            push_text(ops, line, row.font, row.font_size);
        }
    }
}

fn push_text(ops: &mut Vec<Operation>, line: &TextLine, font: Font, size: f32) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![font.resource_name().into(), Object::Real(size)],
    ));
    ops.push(Operation::new(
        "Td",
        vec![Object::Real(line.x), Object::Real(line.baseline)],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_text(&line.text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn fill_color(color: Rgb) -> Operation {
    let [r, g, b] = color.unit();
    Operation::new(
        "rg",
        vec![Object::Real(r), Object::Real(g), Object::Real(b)],
    )
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Operation {
    Operation::new(
        "re",
        vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(width),
            Object::Real(height),
        ],
    )
}
