//! Error types for the causelist-pdf library.
//!
//! Two distinct error types reflect the two stages of the pipeline:
//!
//! * [`ExtractionError`] is **recoverable**: the raw table held no usable
//!   data (the page was not fully loaded, the wrong table was picked, or the
//!   listing is genuinely empty). The caller can reload the page and feed a
//!   fresh set of rows.
//!
//! * [`RenderError`] is **terminal for this run**: the records could not be
//!   laid out or the document could not be written. Always surfaced, never
//!   swallowed.
//!
//! [`CauseListError`] wraps both for the combined entry points in
//! [`crate::report`], keeping the kind visible through [`CauseListError::is_no_data`].

use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning raw table rows into a [`crate::RecordSet`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Every row was filtered out; a header-only report would be misleading.
    #[error(
        "No valid cause-list rows found ({skipped} of {total} rows skipped).\n\
Make sure the table has fully loaded before extracting."
    )]
    NoValidRows { total: usize, skipped: usize },

    /// The page does not contain the expected table element.
    #[error("No table matching '{selector}' found in the page")]
    TableNotFound { selector: String },

    /// The CSS selector used to locate the table does not parse.
    #[error("Invalid table selector '{selector}': {detail}")]
    InvalidSelector { selector: String, detail: String },
}

/// Failures while laying out or writing the PDF document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The record set holds only its header row.
    #[error("Refusing to render a cause list with no data rows")]
    EmptyRecordSet,

    /// Theme validation failed.
    #[error("Invalid report theme: {0}")]
    InvalidTheme(String),

    /// lopdf could not serialise the document.
    #[error("PDF encoding failed: {0}")]
    Encode(String),

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied writer rejected the bytes.
    #[error("Failed to write PDF to output stream: {0}")]
    Sink(#[source] std::io::Error),
}

/// Either stage failing in [`crate::report::generate_report`].
#[derive(Debug, Error)]
pub enum CauseListError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl CauseListError {
    /// `true` when the failure means "nothing to report" rather than a
    /// broken destination; callers typically re-acquire the page and retry.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            CauseListError::Extraction(_) | CauseListError::Render(RenderError::EmptyRecordSet)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_valid_rows_display() {
        let e = ExtractionError::NoValidRows {
            total: 7,
            skipped: 7,
        };
        let msg = e.to_string();
        assert!(msg.contains("7 of 7"), "got: {msg}");
    }

    #[test]
    fn table_not_found_display() {
        let e = ExtractionError::TableNotFound {
            selector: "#dispTable".into(),
        };
        assert!(e.to_string().contains("#dispTable"));
    }

    #[test]
    fn write_failed_keeps_source() {
        let e = RenderError::WriteFailed {
            path: PathBuf::from("/nope/out.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/nope/out.pdf"));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn no_data_classification() {
        let extraction: CauseListError = ExtractionError::NoValidRows {
            total: 0,
            skipped: 0,
        }
        .into();
        assert!(extraction.is_no_data());

        let empty: CauseListError = RenderError::EmptyRecordSet.into();
        assert!(empty.is_no_data());

        let write: CauseListError = RenderError::WriteFailed {
            path: PathBuf::from("out.pdf"),
            source: std::io::Error::other("disk full"),
        }
        .into();
        assert!(!write.is_no_data());
    }
}
