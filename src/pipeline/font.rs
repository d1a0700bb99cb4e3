//! Standard-14 Helvetica metrics and `WinAnsiEncoding`.
//!
//! The report uses the PDF base fonts so nothing has to be embedded. Those
//! fonts only cover `WinAnsiEncoding`; a character outside it is drawn as
//! `?`. Measurement goes through the same [`encode_char`] mapping as drawing,
//! so a wrapped line is exactly as wide on the page as the wrapper computed.

/// Ascender height of both Helvetica faces, in em.
pub const ASCENT: f32 = 0.718;

/// The two faces the report draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PDF `BaseFont` name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.glyph_width(encode_char(c))))
            .sum();
        units as f32 * size / 1000.0
    }

    /// Advance width in 1/1000 em of a WinAnsi code.
    fn glyph_width(self, code: u8) -> u16 {
        let table = match self {
            Font::Helvetica => &HELVETICA_ASCII,
            Font::HelveticaBold => &HELVETICA_BOLD_ASCII,
        };
        match code {
            0x20..=0x7E => table[usize::from(code - 0x20)],
            _ => self.upper_width(code),
        }
    }

    /// Widths above ASCII. Accented Latin letters share their base letter's
    /// advance closely enough that one value per class suffices.
    #[rustfmt::skip]
    fn upper_width(self, code: u8) -> u16 {
        let bold = matches!(self, Font::HelveticaBold);
        match code {
            0x80 => 556,                              // Euro
            0x85 | 0x89 => 1000,                      // ellipsis, per mille
            0x91 | 0x92 => if bold { 278 } else { 222 }, // single quotes
            0x93 | 0x94 => if bold { 500 } else { 333 }, // double quotes
            0x95 => 350,                              // bullet
            0x96 => 556,                              // en dash
            0x97 => 1000,                             // em dash
            0xA0 => 278,                              // nbsp
            0xC0..=0xC5 | 0xC8..=0xCB | 0xD2..=0xD6 | 0xD9..=0xDD => {
                if bold { 722 } else { 667 }
            }
            0xC6 => 1000,
            0xE0..=0xFF => if bold { 611 } else { 556 },
            _ => if bold { 611 } else { 556 },
        }
    }
}

/// Map a character to its `WinAnsiEncoding` byte, `?` when unmapped.
pub fn encode_char(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Encode a whole string for a `Tj` operand.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

// Advance widths for 0x20..=0x7E from the Adobe core font AFM files.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // p..~
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];
