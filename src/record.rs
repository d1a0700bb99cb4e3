//! Row and record types flowing through the pipeline.
//!
//! [`RawRow`]s arrive from whatever acquired the page; they are consumed once
//! by [`crate::pipeline::extract`]. The resulting [`RecordSet`] is immutable
//! and is handed to the renderer by reference.

use serde::{Deserialize, Serialize};

/// Number of columns in a cause-list record.
pub const RECORD_ARITY: usize = 4;

/// The four cause-list columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Serial,
    CaseInfo,
    PartyInfo,
    Advocate,
}

impl Column {
    pub const ALL: [Column; RECORD_ARITY] = [
        Column::Serial,
        Column::CaseInfo,
        Column::PartyInfo,
        Column::Advocate,
    ];

    pub fn index(self) -> usize {
        match self {
            Column::Serial => 0,
            Column::CaseInfo => 1,
            Column::PartyInfo => 2,
            Column::Advocate => 3,
        }
    }
}

/// One unprocessed table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCellRepr")]
pub struct RawCell {
    /// Cell text as rendered by the page, line breaks included.
    pub text: String,
    /// The cell merges several logical columns (banner or divider row).
    pub is_spanned: bool,
}

impl RawCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_spanned: false,
        }
    }

    pub fn spanned(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_spanned: true,
        }
    }
}

/// JSON dumps may carry cells as bare strings or as full objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCellRepr {
    Text(String),
    Full {
        text: String,
        #[serde(default, alias = "isSpanned")]
        is_spanned: bool,
    },
}

impl From<RawCellRepr> for RawCell {
    fn from(repr: RawCellRepr) -> Self {
        match repr {
            RawCellRepr::Text(text) => RawCell::new(text),
            RawCellRepr::Full { text, is_spanned } => RawCell { text, is_spanned },
        }
    }
}

/// One unprocessed table row, cells in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }

    /// A row of plain, unspanned cells.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(RawCell::new).collect(),
        }
    }

    pub fn cells(&self) -> &[RawCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn has_spanned_cell(&self) -> bool {
        self.cells.iter().any(|c| c.is_spanned)
    }
}

impl From<Vec<RawCell>> for RawRow {
    fn from(cells: Vec<RawCell>) -> Self {
        Self::new(cells)
    }
}

/// One validated cause-list entry.
///
/// Fields produced by the extractor never contain newlines or runs of
/// whitespace; `case_info` has had UI action labels removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub serial: String,
    pub case_info: String,
    pub party_info: String,
    pub advocate: String,
}

impl Record {
    pub fn new(
        serial: impl Into<String>,
        case_info: impl Into<String>,
        party_info: impl Into<String>,
        advocate: impl Into<String>,
    ) -> Self {
        Self {
            serial: serial.into(),
            case_info: case_info.into(),
            party_info: party_info.into(),
            advocate: advocate.into(),
        }
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&str; RECORD_ARITY] {
        [
            &self.serial,
            &self.case_info,
            &self.party_info,
            &self.advocate,
        ]
    }

    /// The default cause-list column titles.
    pub fn default_header() -> Self {
        Self::new("Sr No", "Case Info", "Party Name", "Advocate")
    }
}

/// Header record followed by data records in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    header: Record,
    rows: Vec<Record>,
}

impl RecordSet {
    pub fn new(header: Record, rows: Vec<Record>) -> Self {
        Self { header, rows }
    }

    /// Build from a flat list whose first element is the header.
    /// Returns `None` when the list has no header either.
    pub fn from_records(mut records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let header = records.remove(0);
        Some(Self::new(header, records))
    }

    pub fn header(&self) -> &Record {
        &self.header
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of data records (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when only the header is present, i.e. a failed extraction.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header first, then data records.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_cell_from_bare_string_and_object() {
        let row: RawRow =
            serde_json::from_str(r#"["1", {"text": "x", "isSpanned": true}, {"text": "y"}]"#)
                .unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.cells()[0], RawCell::new("1"));
        assert!(row.cells()[1].is_spanned);
        assert!(!row.cells()[2].is_spanned);
        assert!(row.has_spanned_cell());
    }

    #[test]
    fn record_set_from_records_splits_header() {
        let set = RecordSet::from_records(vec![
            Record::default_header(),
            Record::new("1", "a", "b", "c"),
        ])
        .unwrap();
        assert_eq!(set.header(), &Record::default_header());
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().count(), 2);
        assert!(RecordSet::from_records(vec![]).is_none());
    }

    #[test]
    fn header_only_is_empty() {
        let set = RecordSet::new(Record::default_header(), vec![]);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
