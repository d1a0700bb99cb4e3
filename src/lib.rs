//! # causelist-pdf
//!
//! Turn a scraped court cause-list table into a printable PDF.
//!
//! The district-court listing page shows the day's cases as one HTML table,
//! littered with banner rows, merged section headings, button labels and
//! hard line breaks. This crate reduces that table to clean four-column
//! records and lays them out as a paginated, banded A4 landscape report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! saved page / raw rows
//!  │
//!  ├─ 1. Source   <tr>/<td> → RawRow (scraper)
//!  ├─ 2. Extract  filter irregular rows, clean fields → RecordSet
//!  ├─ 3. Layout   wrap cells, paginate, repeat header → page layout
//!  └─ 4. PDF      content streams + standard fonts (lopdf), atomic write
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use causelist_pdf::{extract, DocumentRenderer, RawRow, ReportTheme};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rows = vec![
//!         RawRow::from_texts(["1", "Suit No 12\nView", "A vs B", "Adv. X"]),
//!         RawRow::from_texts(["", "", "", ""]),
//!     ];
//!     let records = extract(&rows)?;
//!     let summary = DocumentRenderer::new(ReportTheme::default())
//!         .render(&records, "Cause_List.pdf")?;
//!     eprintln!("{} pages, {} rows", summary.pages, summary.data_rows);
//!     Ok(())
//! }
//! ```
//!
//! From a saved page in one call:
//!
//! ```rust,no_run
//! use causelist_pdf::{generate_report_from_html, ReportConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let html = std::fs::read_to_string("cause_list.html")?;
//! match generate_report_from_html(&html, &ReportConfig::default(), "Cause_List.pdf") {
//!     Ok(summary) => println!("{} pages", summary.pages),
//!     Err(e) if e.is_no_data() => eprintln!("table not loaded yet, reload and retry: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `causelist` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! causelist-pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ExtractionConfig, ExtractionConfigBuilder, Orientation, Padding, PageSize, ReportConfig,
    ReportTheme, ReportThemeBuilder, Rgb, DEFAULT_TABLE_SELECTOR,
};
pub use error::{CauseListError, ExtractionError, RenderError};
pub use output::RenderSummary;
pub use pipeline::extract::{extract, RecordExtractor};
pub use pipeline::normalize::{normalize_field, StripToken, TextRule, TokenMatch};
pub use pipeline::source::rows_from_html;
pub use record::{Column, RawCell, RawRow, Record, RecordSet};
pub use render::{render, DocumentRenderer};
pub use report::{extract_records, generate_report, generate_report_from_html};
