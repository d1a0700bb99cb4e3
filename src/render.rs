//! Document rendering entry points.
//!
//! [`DocumentRenderer`] takes a validated [`RecordSet`] through layout and
//! PDF serialisation. The bytes are produced fully in memory before anything
//! touches the destination, so a layout or encoding failure never leaves a
//! file behind. File output is atomic: a temporary file in the destination
//! directory is written, then renamed over the target.

use crate::config::ReportTheme;
use crate::error::RenderError;
use crate::output::RenderSummary;
use crate::pipeline::{layout, pdf};
use crate::record::RecordSet;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Render with the default theme.
pub fn render(records: &RecordSet, dest: impl AsRef<Path>) -> Result<RenderSummary, RenderError> {
    DocumentRenderer::default().render(records, dest)
}

/// Lays out and writes cause-list PDFs with a fixed [`ReportTheme`].
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    theme: ReportTheme,
}

impl DocumentRenderer {
    pub fn new(theme: ReportTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &ReportTheme {
        &self.theme
    }

    /// Render `records` to a PDF file at `dest`.
    ///
    /// Parent directories are created as needed. The destination is written
    /// exactly once; on failure it is left as it was.
    ///
    /// # Errors
    /// - [`RenderError::EmptyRecordSet`] for a header-only set (nothing is written)
    /// - [`RenderError::InvalidTheme`] / [`RenderError::Encode`] from layout and serialisation
    /// - [`RenderError::WriteFailed`] when the destination cannot be written
    pub fn render(
        &self,
        records: &RecordSet,
        dest: impl AsRef<Path>,
    ) -> Result<RenderSummary, RenderError> {
        let path = dest.as_ref();
        let (bytes, summary) = self.build(records)?;
        write_atomic(path, &bytes)?;
        info!(
            "Wrote {} ({} pages, {} rows, {} bytes)",
            path.display(),
            summary.pages,
            summary.data_rows,
            summary.bytes
        );
        Ok(summary)
    }

    /// Render to an in-memory PDF.
    pub fn render_to_vec(&self, records: &RecordSet) -> Result<(Vec<u8>, RenderSummary), RenderError> {
        self.build(records)
    }

    /// Render and stream the PDF into `writer`.
    pub fn render_to_writer<W: Write>(
        &self,
        records: &RecordSet,
        mut writer: W,
    ) -> Result<RenderSummary, RenderError> {
        let (bytes, summary) = self.build(records)?;
        writer.write_all(&bytes).map_err(RenderError::Sink)?;
        writer.flush().map_err(RenderError::Sink)?;
        Ok(summary)
    }

    fn build(&self, records: &RecordSet) -> Result<(Vec<u8>, RenderSummary), RenderError> {
        if records.is_empty() {
            return Err(RenderError::EmptyRecordSet);
        }
        let doc = layout::layout_document(records, &self.theme)?;
        let bytes = pdf::write_pdf(&doc, &self.theme)?;
        let summary = RenderSummary {
            pages: doc.pages.len(),
            header_rows: doc.header_rows(),
            data_rows: doc.data_rows,
            split_rows: doc.split_rows,
            bytes: bytes.len(),
        };
        debug!("Render summary: {:?}", summary);
        Ok((bytes, summary))
    }
}

/// Write `bytes` to `path` through a sibling temp file and a rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let write_failed = |source: std::io::Error| RenderError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_failed)?;

    // Dropping the temp file on an early return removes it.
    let mut tmp = tempfile::Builder::new()
        .prefix(".causelist-")
        .suffix(".pdf.tmp")
        .tempfile_in(parent)
        .map_err(write_failed)?;
    tmp.write_all(bytes).map_err(write_failed)?;
    tmp.as_file().sync_all().map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;
    Ok(())
}
