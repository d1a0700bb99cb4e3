//! Table layout and pagination.
//!
//! Turns a [`RecordSet`] plus a [`ReportTheme`] into absolute page geometry:
//! where every row, cell background, border and text line goes on which
//! page. Nothing here knows about PDF syntax; [`crate::pipeline::pdf`] only
//! draws what this module decided.
//!
//! ## Flow
//!
//! The first page opens with the centred title and a spacer, then the table
//! header. Data rows follow top to bottom. When a row does not fit the space
//! left on the page it moves to a fresh page (which starts with the header
//! again when `repeat_header` is on). A row taller than a whole fresh page
//! is split line-wise: as many lines of each cell as fit go on this page and
//! the rest continue on the next, so no text is ever dropped.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left.

use crate::config::{ReportTheme, Rgb};
use crate::error::RenderError;
use crate::pipeline::font::{Font, ASCENT};
use crate::pipeline::wrap::wrap_text;
use crate::record::{Record, RecordSet, RECORD_ARITY};
use tracing::debug;

const EPSILON: f32 = 1e-3;

/// The whole document, ready to draw.
#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub pages: Vec<PageLayout>,
    /// Distinct data records laid out.
    pub data_rows: usize,
    /// Data records continued across a page break.
    pub split_rows: usize,
}

impl DocumentLayout {
    pub fn header_rows(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.rows.iter())
            .filter(|r| r.kind == RowKind::Header)
            .count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Title lines; only the first page has any.
    pub title: Vec<TextLine>,
    pub title_font_size: f32,
    pub rows: Vec<RowLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    /// `index` counts data records from 0; `continued` marks the tail of a
    /// record split across pages.
    Data { index: usize, continued: bool },
}

#[derive(Debug, Clone)]
pub struct RowLayout {
    pub kind: RowKind,
    /// Y of the top edge.
    pub top: f32,
    pub height: f32,
    pub background: Rgb,
    pub text_color: Rgb,
    pub font: Font,
    pub font_size: f32,
    pub cells: Vec<CellLayout>,
}

#[derive(Debug, Clone)]
pub struct CellLayout {
    pub x: f32,
    pub width: f32,
    pub lines: Vec<TextLine>,
}

/// One line of text at an absolute position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
}

/// Lay out `records` on pages according to `theme`.
///
/// # Errors
/// * [`RenderError::EmptyRecordSet`]: no data rows; checked before anything else.
/// * [`RenderError::InvalidTheme`]: the theme cannot hold a table.
pub fn layout_document(
    records: &RecordSet,
    theme: &ReportTheme,
) -> Result<DocumentLayout, RenderError> {
    if records.is_empty() {
        return Err(RenderError::EmptyRecordSet);
    }
    theme.validate()?;

    let mut paginator = Paginator::new(theme);

    paginator.place_title();
    paginator.header = paginator.wrap_record(records.header(), Font::HelveticaBold);
    let header_height = paginator.row_height(&paginator.header);
    if header_height + theme.min_row_height() > theme.frame_height() + EPSILON {
        return Err(RenderError::InvalidTheme(format!(
            "header row is {header_height:.1}pt tall, leaving no room for data in a {:.1}pt frame",
            theme.frame_height()
        )));
    }
    paginator.place_header();

    let mut split_rows = 0;
    for (index, record) in records.rows().iter().enumerate() {
        let lines = paginator.wrap_record(record, Font::Helvetica);
        if paginator.place_data_row(index, lines) {
            split_rows += 1;
        }
    }

    let pages = paginator.finish();
    debug!(
        "Laid out {} data rows on {} pages ({} split)",
        records.len(),
        pages.len(),
        split_rows
    );

    let (page_width, page_height) = theme.page_dimensions();
    Ok(DocumentLayout {
        page_width,
        page_height,
        pages,
        data_rows: records.len(),
        split_rows,
    })
}

/// Wrapped lines per column of one row.
type RowLines = [Vec<String>; RECORD_ARITY];

struct Paginator<'a> {
    theme: &'a ReportTheme,
    column_x: [f32; RECORD_ARITY],
    top: f32,
    bottom: f32,
    cursor: f32,
    pages: Vec<PageLayout>,
    page: PageLayout,
    /// Opened by a page break and holding no data yet.
    page_is_fresh: bool,
    header: RowLines,
}

impl<'a> Paginator<'a> {
    fn new(theme: &'a ReportTheme) -> Self {
        let (_, page_height) = theme.page_dimensions();
        // Centred in the frame, like a flowing table.
        let left = theme.margin + (theme.frame_width() - theme.table_width()) / 2.0;
        let mut column_x = [0.0; RECORD_ARITY];
        let mut x = left;
        for (slot, width) in column_x.iter_mut().zip(theme.column_widths) {
            *slot = x;
            x += width;
        }
        let top = page_height - theme.margin;
        Self {
            theme,
            column_x,
            top,
            bottom: theme.margin,
            cursor: top,
            pages: Vec::new(),
            page: PageLayout::default(),
            page_is_fresh: false,
            header: Default::default(),
        }
    }

    fn wrap_record(&self, record: &Record, font: Font) -> RowLines {
        let t = self.theme;
        let fields = record.fields();
        std::array::from_fn(|i| {
            let inner = t.column_widths[i] - t.padding.left - t.padding.right;
            wrap_text(fields[i], font, t.font_size, inner)
        })
    }

    fn row_height(&self, lines: &RowLines) -> f32 {
        let n = lines.iter().map(Vec::len).max().unwrap_or(0).max(1);
        n as f32 * self.theme.leading + self.theme.padding.top + self.theme.padding.bottom
    }

    fn available(&self) -> f32 {
        self.cursor - self.bottom
    }

    fn place_title(&mut self) {
        let t = self.theme;
        let lines = wrap_text(
            &t.title,
            Font::HelveticaBold,
            t.title_font_size,
            t.frame_width(),
        );
        if lines.is_empty() {
            return;
        }
        let mut baseline = self.cursor - ASCENT * t.title_font_size;
        for text in lines {
            let width = Font::HelveticaBold.text_width(&text, t.title_font_size);
            let x = t.margin + (t.frame_width() - width) / 2.0;
            self.page.title.push(TextLine { text, x, baseline });
            baseline -= t.title_leading;
            self.cursor -= t.title_leading;
        }
        self.page.title_font_size = t.title_font_size;
        self.cursor -= t.title_spacing;
    }

    fn place_header(&mut self) {
        let lines = self.header.clone();
        let height = self.row_height(&lines);
        let row = self.build_row(
            RowKind::Header,
            lines,
            height,
            self.theme.header_background,
            self.theme.header_text,
            Font::HelveticaBold,
        );
        self.page.rows.push(row);
        self.cursor -= height;
    }

    /// Place one data record, splitting it if it cannot fit any page.
    /// Returns whether it was split.
    fn place_data_row(&mut self, index: usize, mut remaining: RowLines) -> bool {
        let t = self.theme;
        let background = t.band_colors[index % 2];
        let vertical_padding = t.padding.top + t.padding.bottom;
        let mut continued = false;

        loop {
            let needed = self.row_height(&remaining);
            if needed <= self.available() + EPSILON {
                self.push_data(index, continued, remaining, needed, background);
                return continued;
            }
            if !self.page_is_fresh && needed <= self.fresh_page_space() + EPSILON {
                self.new_page();
                continue;
            }

            // Saturating cast: no room at all yields 0.
            let fit = ((self.available() - vertical_padding) / t.leading).floor() as usize;
            // A fresh page always takes at least one line so layout makes progress.
            let fit = if self.page_is_fresh { fit.max(1) } else { fit };
            if fit == 0 {
                self.new_page();
                continue;
            }

            let head: RowLines =
                std::array::from_fn(|i| remaining[i].drain(..fit.min(remaining[i].len())).collect());
            let height = self.row_height(&head);
            self.push_data(index, continued, head, height, background);
            continued = true;
            if remaining.iter().all(Vec::is_empty) {
                return true;
            }
            self.new_page();
        }
    }

    /// Space a data row gets on a page that has nothing but (maybe) the header.
    fn fresh_page_space(&self) -> f32 {
        let header = if self.theme.repeat_header {
            self.row_height(&self.header)
        } else {
            0.0
        };
        self.top - self.bottom - header
    }

    fn push_data(
        &mut self,
        index: usize,
        continued: bool,
        lines: RowLines,
        height: f32,
        background: Rgb,
    ) {
        let row = self.build_row(
            RowKind::Data { index, continued },
            lines,
            height,
            background,
            self.theme.body_text,
            Font::Helvetica,
        );
        self.page.rows.push(row);
        self.cursor -= height;
        self.page_is_fresh = false;
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.page);
        self.pages.push(finished);
        self.cursor = self.top;
        self.page_is_fresh = true;
        if self.theme.repeat_header {
            self.place_header();
        }
    }

    fn build_row(
        &self,
        kind: RowKind,
        lines: RowLines,
        height: f32,
        background: Rgb,
        text_color: Rgb,
        font: Font,
    ) -> RowLayout {
        let t = self.theme;
        let top = self.cursor;
        let first_baseline = top - t.padding.top - ASCENT * t.font_size;
        let cells = lines
            .into_iter()
            .enumerate()
            .map(|(i, cell_lines)| {
                let x = self.column_x[i];
                let lines = cell_lines
                    .into_iter()
                    .enumerate()
                    .map(|(j, text)| TextLine {
                        text,
                        x: x + t.padding.left,
                        baseline: first_baseline - j as f32 * t.leading,
                    })
                    .collect();
                CellLayout {
                    x,
                    width: t.column_widths[i],
                    lines,
                }
            })
            .collect();
        RowLayout {
            kind,
            top,
            height,
            background,
            text_color,
            font,
            font_size: t.font_size,
            cells,
        }
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.pages.push(self.page);
        self.pages
    }
}
