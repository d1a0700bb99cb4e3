//! Result types returned by the renderer.

use serde::{Deserialize, Serialize};

/// What a successful render produced.
///
/// Serves as the caller's success signal and is cheap to log or serialise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSummary {
    /// Pages in the document.
    pub pages: usize,
    /// Header rows drawn (one per page when the header repeats).
    pub header_rows: usize,
    /// Distinct data records drawn.
    pub data_rows: usize,
    /// Data records too tall for one page and continued on the next.
    pub split_rows: usize,
    /// Size of the finished PDF in bytes.
    pub bytes: usize,
}
