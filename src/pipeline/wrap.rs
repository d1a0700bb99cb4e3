//! Line breaking for table cells.
//!
//! Cells are flowing paragraphs of fixed width. Break opportunities are tried
//! from most to least natural:
//!
//! 1. Unicode whitespace between words;
//! 2. UAX #29 word boundaries inside a run that is too wide on its own (this
//!    is what splits ideographic text, which has no spaces at all);
//! 3. grapheme clusters, for runs with no internal boundary (long case
//!    numbers, Thai, URLs).
//!
//! A line is only ever wider than the limit when it holds a single grapheme
//! that is itself wider than the column.

use crate::pipeline::font::Font;
use unicode_segmentation::UnicodeSegmentation;

// Absorbs float error when summing glyph widths.
const EPSILON: f32 = 1e-3;

/// Wrap `text` into lines no wider than `max_width` points.
///
/// Whitespace runs collapse to one space; an empty or all-whitespace text
/// yields no lines.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut wrapper = LineWrapper {
        font,
        size,
        max_width: max_width + EPSILON,
        space_width: font.text_width(" ", size),
        lines: Vec::new(),
        line: String::new(),
        line_width: 0.0,
    };

    for word in text.split_whitespace() {
        let width = font.text_width(word, size);
        if width <= wrapper.max_width {
            wrapper.push_word(word, width);
        } else {
            wrapper.push_overlong_word(word);
        }
    }
    wrapper.finish()
}

struct LineWrapper {
    font: Font,
    size: f32,
    max_width: f32,
    space_width: f32,
    lines: Vec<String>,
    line: String,
    line_width: f32,
}

impl LineWrapper {
    fn push_word(&mut self, word: &str, width: f32) {
        if self.line.is_empty() {
            self.start_line(word, width);
        } else if self.line_width + self.space_width + width <= self.max_width {
            self.line.push(' ');
            self.line.push_str(word);
            self.line_width += self.space_width + width;
        } else {
            self.break_line();
            self.start_line(word, width);
        }
    }

    /// Place a word wider than a whole line, piece by piece.
    fn push_overlong_word(&mut self, word: &str) {
        let mut first = true;
        for piece in self.pieces(word) {
            let width = self.font.text_width(piece, self.size);
            let gap = if first && !self.line.is_empty() {
                self.space_width
            } else {
                0.0
            };
            if self.line.is_empty() {
                self.start_line(piece, width);
            } else if self.line_width + gap + width <= self.max_width {
                if gap > 0.0 {
                    self.line.push(' ');
                }
                self.line.push_str(piece);
                self.line_width += gap + width;
            } else {
                self.break_line();
                self.start_line(piece, width);
            }
            first = false;
        }
    }

    /// Word-boundary segments that fit, graphemes for those that don't.
    fn pieces<'a>(&self, word: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        for segment in word.split_word_bounds() {
            if self.font.text_width(segment, self.size) <= self.max_width {
                out.push(segment);
            } else {
                out.extend(segment.graphemes(true));
            }
        }
        out
    }

    fn start_line(&mut self, text: &str, width: f32) {
        self.line.push_str(text);
        self.line_width = width;
    }

    fn break_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.line));
        self.line_width = 0.0;
    }

    fn finish(mut self) -> Vec<String> {
        if !self.line.is_empty() {
            self.break_line();
        }
        self.lines
    }
}
