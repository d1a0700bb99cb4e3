//! Configuration types for cause-list extraction and rendering.
//!
//! Extraction behaviour lives in [`ExtractionConfig`]; every visual decision
//! the renderer makes lives in [`ReportTheme`]. Layout code reads the theme
//! and nothing else, so an alternative look (letter paper, different brand
//! colours, tighter padding) is a new theme value, not a code change.
//!
//! Both are built through validating builders, following the same pattern:
//! set what you care about, rely on documented defaults for the rest.

use crate::error::RenderError;
use crate::pipeline::normalize::{StripToken, TextRule};
use crate::record::{Column, Record, RECORD_ARITY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One PDF point is 1/72 inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Default table selector for saved eCourts cause-list pages.
pub const DEFAULT_TABLE_SELECTOR: &str = "#dispTable";

// ── Extraction ───────────────────────────────────────────────────────────

/// How raw rows become records.
///
/// # Example
/// ```rust
/// use causelist_pdf::{Column, ExtractionConfig, StripToken, TokenMatch};
/// use std::sync::Arc;
///
/// let config = ExtractionConfig::builder()
///     .clear_rules(Column::CaseInfo)
///     .rule(
///         Column::CaseInfo,
///         Arc::new(StripToken::new("details", TokenMatch::WholeWord).unwrap()),
///     )
///     .build();
/// assert_eq!(config.rules_for(Column::CaseInfo).len(), 1);
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Column titles placed at the head of every [`crate::RecordSet`].
    pub header: Record,

    /// Cleanup rules per column, indexed by [`Column::index`]. Default: the
    /// "view" button label is stripped from the case-info column.
    pub column_rules: [Vec<Arc<dyn TextRule>>; RECORD_ARITY],

    /// Skip rows whose four fields are all empty after normalisation. Default: true.
    ///
    /// Such rows are layout fillers or placeholders; they carry no entry.
    pub skip_blank_rows: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let view: Arc<dyn TextRule> = Arc::new(StripToken::view_label());
        Self {
            header: Record::default_header(),
            column_rules: [Vec::new(), vec![view], Vec::new(), Vec::new()],
            skip_blank_rows: true,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<Vec<&str>> = self
            .column_rules
            .iter()
            .map(|rules| rules.iter().map(|r| r.name()).collect())
            .collect();
        f.debug_struct("ExtractionConfig")
            .field("header", &self.header)
            .field("column_rules", &rules)
            .field("skip_blank_rows", &self.skip_blank_rows)
            .finish()
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    pub fn rules_for(&self, column: Column) -> &[Arc<dyn TextRule>] {
        &self.column_rules[column.index()]
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn header(mut self, header: Record) -> Self {
        self.config.header = header;
        self
    }

    /// Append a cleanup rule to a column.
    pub fn rule(mut self, column: Column, rule: Arc<dyn TextRule>) -> Self {
        self.config.column_rules[column.index()].push(rule);
        self
    }

    /// Drop all cleanup rules of a column, including the defaults.
    pub fn clear_rules(mut self, column: Column) -> Self {
        self.config.column_rules[column.index()].clear();
        self
    }

    pub fn skip_blank_rows(mut self, v: bool) -> Self {
        self.config.skip_blank_rows = v;
        self
    }

    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

// ── Theme ────────────────────────────────────────────────────────────────

/// Visual policy for the rendered cause list.
///
/// Deserialises from JSON with every field optional, so a theme file only
/// needs the fields it changes.
///
/// # Example
/// ```rust
/// use causelist_pdf::{Orientation, PageSize, ReportTheme};
///
/// let theme = ReportTheme::builder()
///     .page_size(PageSize::Letter)
///     .orientation(Orientation::Portrait)
///     .column_ratios(ReportTheme::DEFAULT_COLUMN_RATIOS)
///     .build()
///     .unwrap();
/// assert!(theme.table_width() <= theme.frame_width());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTheme {
    /// Paper size. Default: A4.
    pub page_size: PageSize,

    /// Default: landscape, which is what gives the free-text columns room.
    pub orientation: Orientation,

    /// Margin on all four sides, in points. Default: 30.
    pub margin: f32,

    /// Absolute column widths in points, table order. Default: 0.6, 3.2, 3.5
    /// and 2.8 inches, giving the two free-text columns the most room.
    pub column_widths: [f32; RECORD_ARITY],

    /// Cell font size in points. Default: 9.
    pub font_size: f32,

    /// Baseline-to-baseline distance of wrapped cell lines. Default: 11.
    pub leading: f32,

    /// Title drawn above the table on the first page.
    pub title: String,

    /// Default: 18.
    pub title_font_size: f32,

    /// Default: 22.
    pub title_leading: f32,

    /// Vertical gap between the title block and the table. Default: 12.
    pub title_spacing: f32,

    /// Default: `#003366`.
    pub header_background: Rgb,

    /// Default: whitesmoke, `#F5F5F5`.
    pub header_text: Rgb,

    /// Default: black.
    pub body_text: Rgb,

    /// Data-row backgrounds by index parity. Default: white, `#F3F3F3`.
    pub band_colors: [Rgb; 2],

    /// Default: grey, `#808080`.
    pub grid_color: Rgb,

    /// Cell border stroke width. Default: 0.25.
    pub grid_width: f32,

    /// Default: 6 left/right, 4 top/bottom.
    pub padding: Padding,

    /// Redraw the header row at the top of every continuation page. Default: true.
    pub repeat_header: bool,
}

impl ReportTheme {
    /// Serial : case info : party info : advocate.
    pub const DEFAULT_COLUMN_RATIOS: [f32; RECORD_ARITY] = [0.6, 3.2, 3.5, 2.8];

    pub fn builder() -> ReportThemeBuilder {
        ReportThemeBuilder {
            theme: Self::default(),
            ratios: None,
        }
    }

    /// Continue building from this theme, e.g. one loaded from JSON.
    pub fn into_builder(self) -> ReportThemeBuilder {
        ReportThemeBuilder {
            theme: self,
            ratios: None,
        }
    }

    /// Page width and height in points, orientation applied.
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_size.portrait_dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Width of the area inside the margins.
    pub fn frame_width(&self) -> f32 {
        self.page_dimensions().0 - 2.0 * self.margin
    }

    /// Height of the area inside the margins.
    pub fn frame_height(&self) -> f32 {
        self.page_dimensions().1 - 2.0 * self.margin
    }

    pub fn table_width(&self) -> f32 {
        self.column_widths.iter().sum()
    }

    /// Height of a row holding a single line of text.
    pub fn min_row_height(&self) -> f32 {
        self.leading + self.padding.top + self.padding.bottom
    }

    /// Check the theme describes a drawable layout.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: String| -> Result<(), RenderError> {
            Err(RenderError::InvalidTheme(msg))
        };

        let (page_w, page_h) = self.page_dimensions();
        if !(page_w.is_finite() && page_h.is_finite() && page_w > 0.0 && page_h > 0.0) {
            return invalid(format!("page size must be positive, got {page_w}x{page_h}"));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return invalid(format!("margin must be ≥ 0, got {}", self.margin));
        }
        if self.frame_width() <= 0.0 || self.frame_height() <= 0.0 {
            return invalid(format!(
                "margin {} leaves no room on a {page_w}x{page_h} page",
                self.margin
            ));
        }
        for (name, v) in [
            ("font_size", self.font_size),
            ("leading", self.leading),
            ("title_font_size", self.title_font_size),
            ("title_leading", self.title_leading),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return invalid(format!("{name} must be positive, got {v}"));
            }
        }
        for (name, v) in [
            ("title_spacing", self.title_spacing),
            ("grid_width", self.grid_width),
            ("padding.left", self.padding.left),
            ("padding.right", self.padding.right),
            ("padding.top", self.padding.top),
            ("padding.bottom", self.padding.bottom),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return invalid(format!("{name} must be ≥ 0, got {v}"));
            }
        }
        for (i, &w) in self.column_widths.iter().enumerate() {
            let inner = w - self.padding.left - self.padding.right;
            if !(w.is_finite() && inner > 0.0) {
                return invalid(format!(
                    "column {} is {w}pt wide, leaving no room for text after padding",
                    i + 1
                ));
            }
        }
        // Small tolerance: widths derived from ratios may round up a hair.
        if self.table_width() > self.frame_width() + 0.01 {
            return invalid(format!(
                "columns total {:.1}pt but the frame is only {:.1}pt wide",
                self.table_width(),
                self.frame_width()
            ));
        }
        // A header row plus one line of data must fit on a continuation page.
        if 2.0 * self.min_row_height() > self.frame_height() {
            return invalid(format!(
                "rows of {:.1}pt do not fit a {:.1}pt frame",
                self.min_row_height(),
                self.frame_height()
            ));
        }
        Ok(())
    }
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Landscape,
            margin: 30.0,
            column_widths: Self::DEFAULT_COLUMN_RATIOS.map(|inches| inches * POINTS_PER_INCH),
            font_size: 9.0,
            leading: 11.0,
            title: "District Court Cause List".to_string(),
            title_font_size: 18.0,
            title_leading: 22.0,
            title_spacing: 12.0,
            header_background: Rgb::from_hex(0x003366),
            header_text: Rgb::from_hex(0xF5F5F5),
            body_text: Rgb::from_hex(0x000000),
            band_colors: [Rgb::from_hex(0xFFFFFF), Rgb::from_hex(0xF3F3F3)],
            grid_color: Rgb::from_hex(0x808080),
            grid_width: 0.25,
            padding: Padding::default(),
            repeat_header: true,
        }
    }
}

/// Builder for [`ReportTheme`].
#[derive(Debug)]
pub struct ReportThemeBuilder {
    theme: ReportTheme,
    ratios: Option<[f32; RECORD_ARITY]>,
}

impl ReportThemeBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.theme.page_size = size;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.theme.orientation = orientation;
        self
    }

    pub fn margin(mut self, points: f32) -> Self {
        self.theme.margin = points;
        self
    }

    /// Absolute column widths in points.
    pub fn column_widths(mut self, widths: [f32; RECORD_ARITY]) -> Self {
        self.theme.column_widths = widths;
        self.ratios = None;
        self
    }

    /// Size columns in this ratio so the table spans the full frame width of
    /// the final page geometry.
    pub fn column_ratios(mut self, ratios: [f32; RECORD_ARITY]) -> Self {
        self.ratios = Some(ratios);
        self
    }

    pub fn font_size(mut self, points: f32) -> Self {
        self.theme.font_size = points;
        self
    }

    pub fn leading(mut self, points: f32) -> Self {
        self.theme.leading = points;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.theme.title = title.into();
        self
    }

    pub fn title_font_size(mut self, points: f32) -> Self {
        self.theme.title_font_size = points;
        self
    }

    pub fn title_spacing(mut self, points: f32) -> Self {
        self.theme.title_spacing = points;
        self
    }

    pub fn header_colors(mut self, background: Rgb, text: Rgb) -> Self {
        self.theme.header_background = background;
        self.theme.header_text = text;
        self
    }

    pub fn band_colors(mut self, even: Rgb, odd: Rgb) -> Self {
        self.theme.band_colors = [even, odd];
        self
    }

    pub fn grid(mut self, color: Rgb, width: f32) -> Self {
        self.theme.grid_color = color;
        self.theme.grid_width = width;
        self
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.theme.padding = padding;
        self
    }

    pub fn repeat_header(mut self, v: bool) -> Self {
        self.theme.repeat_header = v;
        self
    }

    /// Build the theme, validating constraints.
    pub fn build(mut self) -> Result<ReportTheme, RenderError> {
        if let Some(ratios) = self.ratios {
            let total: f32 = ratios.iter().sum();
            if !(total.is_finite() && total > 0.0) || ratios.iter().any(|r| *r <= 0.0) {
                return Err(RenderError::InvalidTheme(format!(
                    "column ratios must be positive, got {ratios:?}"
                )));
            }
            let frame = self.theme.frame_width();
            self.theme.column_widths = ratios.map(|r| r / total * frame);
        }
        self.theme.validate()?;
        Ok(self.theme)
    }
}

// ── Geometry & colour types ──────────────────────────────────────────────

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// 210 × 297 mm. (default)
    #[default]
    A4,
    /// 8.5 × 11 in.
    Letter,
    /// 8.5 × 14 in.
    Legal,
    /// Arbitrary portrait dimensions in points.
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Width and height in points, portrait.
    pub fn portrait_dimensions(&self) -> (f32, f32) {
        match *self {
            PageSize::A4 => (595.2756, 841.8898),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Inner cell spacing in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 6.0,
            right: 6.0,
            top: 4.0,
            bottom: 4.0,
        }
    }
}

/// An sRGB colour, written as `#RRGGBB` in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected a #RRGGBB colour, got '{s}'"));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|e| format!("bad colour '{s}': {e}"))
    }

    /// Components scaled to `0.0..=1.0`, as PDF colour operators expect.
    pub fn unit(&self) -> [f32; 3] {
        [self.r, self.g, self.b].map(|c| f32::from(c) / 255.0)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::parse(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ── Combined ─────────────────────────────────────────────────────────────

/// Everything [`crate::report::generate_report`] needs.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub extraction: ExtractionConfig,
    pub theme: ReportTheme,
    /// CSS selector locating the cause-list table in a saved page.
    pub table_selector: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            theme: ReportTheme::default(),
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_valid_a4_landscape() {
        let theme = ReportTheme::default();
        theme.validate().unwrap();
        let (w, h) = theme.page_dimensions();
        assert!(w > h);
        assert!((theme.column_widths[0] - 43.2).abs() < 1e-3);
        assert!((theme.table_width() - 727.2).abs() < 1e-3);
        assert!(theme.table_width() < theme.frame_width());
    }

    #[test]
    fn portrait_a4_rejects_absolute_landscape_widths() {
        let err = ReportTheme::builder()
            .orientation(Orientation::Portrait)
            .build()
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidTheme(_)), "got {err:?}");
    }

    #[test]
    fn ratios_fill_frame_width() {
        let theme = ReportTheme::builder()
            .orientation(Orientation::Portrait)
            .column_ratios(ReportTheme::DEFAULT_COLUMN_RATIOS)
            .build()
            .unwrap();
        assert!((theme.table_width() - theme.frame_width()).abs() < 0.01);
        let ratio = theme.column_widths[2] / theme.column_widths[0];
        assert!((ratio - 3.5 / 0.6).abs() < 1e-3);
    }

    #[test]
    fn rejects_margin_that_eats_page() {
        let err = ReportTheme::builder().margin(500.0).build().unwrap_err();
        assert!(err.to_string().contains("margin"));
    }

    #[test]
    fn rejects_column_narrower_than_padding() {
        let err = ReportTheme::builder()
            .column_widths([10.0, 200.0, 200.0, 200.0])
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("column 1"));
    }

    #[test]
    fn rejects_non_positive_ratio() {
        assert!(ReportTheme::builder()
            .column_ratios([0.0, 1.0, 1.0, 1.0])
            .build()
            .is_err());
    }

    #[test]
    fn rgb_parse_and_display() {
        let c = Rgb::parse("#003366").unwrap();
        assert_eq!(c, Rgb::new(0x00, 0x33, 0x66));
        assert_eq!(c.to_string(), "#003366");
        assert!(Rgb::parse("#03f").is_err());
        assert_eq!(Rgb::from_hex(0xFFFFFF).unit(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn partial_theme_json_fills_defaults() {
        let theme: ReportTheme = serde_json::from_str(
            r##"{"title": "Sessions Court", "header_background": "#112233", "padding": {"left": 3}}"##,
        )
        .unwrap();
        assert_eq!(theme.title, "Sessions Court");
        assert_eq!(theme.header_background, Rgb::from_hex(0x112233));
        assert_eq!(theme.padding.left, 3.0);
        assert_eq!(theme.padding.top, 4.0);
        assert_eq!(theme.margin, 30.0);
        theme.validate().unwrap();
    }

    #[test]
    fn extraction_defaults_strip_view_from_case_info_only() {
        let config = ExtractionConfig::default();
        assert_eq!(config.rules_for(Column::CaseInfo).len(), 1);
        assert!(config.rules_for(Column::Serial).is_empty());
        assert!(config.rules_for(Column::PartyInfo).is_empty());
        assert!(config.rules_for(Column::Advocate).is_empty());
        assert!(format!("{config:?}").contains("strip-token"));
    }

    #[test]
    fn into_builder_keeps_loaded_fields() {
        let loaded = ReportTheme {
            title: "Family Court".into(),
            ..ReportTheme::default()
        };
        let theme = loaded
            .into_builder()
            .orientation(Orientation::Portrait)
            .column_ratios(ReportTheme::DEFAULT_COLUMN_RATIOS)
            .build()
            .unwrap();
        assert_eq!(theme.title, "Family Court");
        assert_eq!(theme.orientation, Orientation::Portrait);
    }
}
