//! Combined extract-then-render entry points.
//!
//! These are what the acquisition side calls once it has the listing page
//! in hand. Extraction failures come back before any rendering starts, and
//! [`CauseListError::is_no_data`] tells the caller whether reloading the page
//! is worth a try.

use crate::config::ReportConfig;
use crate::error::CauseListError;
use crate::output::RenderSummary;
use crate::pipeline::extract::RecordExtractor;
use crate::pipeline::source::rows_from_html;
use crate::record::{RawRow, RecordSet};
use crate::render::DocumentRenderer;
use std::path::Path;
use tracing::info;

/// Extract records from `rows` and render them to `dest`.
pub fn generate_report(
    rows: &[RawRow],
    config: &ReportConfig,
    dest: impl AsRef<Path>,
) -> Result<RenderSummary, CauseListError> {
    let records = extract_records(rows, config)?;
    let summary = DocumentRenderer::new(config.theme.clone()).render(&records, dest)?;
    Ok(summary)
}

/// Read the cause-list table out of a saved page, then [`generate_report`].
pub fn generate_report_from_html(
    html: &str,
    config: &ReportConfig,
    dest: impl AsRef<Path>,
) -> Result<RenderSummary, CauseListError> {
    let rows = rows_from_html(html, &config.table_selector)?;
    info!("Read {} table rows from page", rows.len());
    generate_report(&rows, config, dest)
}

/// Extraction half of [`generate_report`], for callers that want the
/// records without a document (e.g. a JSON dump).
pub fn extract_records(rows: &[RawRow], config: &ReportConfig) -> Result<RecordSet, CauseListError> {
    Ok(RecordExtractor::new(config.extraction.clone()).extract(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, RenderError};

    #[test]
    fn extraction_failure_skips_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        let rows = vec![RawRow::from_texts(["", "", "", ""])];
        let err = generate_report(&rows, &ReportConfig::default(), &dest).unwrap_err();
        assert!(err.is_no_data());
        assert!(matches!(
            err,
            CauseListError::Extraction(ExtractionError::NoValidRows { .. })
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn render_failure_is_not_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let rows = vec![RawRow::from_texts(["1", "a", "b", "c"])];
        let err = generate_report(&rows, &ReportConfig::default(), blocker.join("out.pdf"))
            .unwrap_err();
        assert!(!err.is_no_data());
        assert!(matches!(
            err,
            CauseListError::Render(RenderError::WriteFailed { .. })
        ));
    }

    #[test]
    fn missing_table_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_report_from_html(
            "<html><body>Loading...</body></html>",
            &ReportConfig::default(),
            dir.path().join("out.pdf"),
        )
        .unwrap_err();
        assert!(err.is_no_data());
    }
}
