//! Record extraction: raw table rows → validated [`RecordSet`].
//!
//! The scraped table is irregular: layout rows with no cells, short rows,
//! merged banner rows ("No cases listed"), section dividers. Rather than
//! guessing where the header sits, extraction relies purely on structure:
//!
//! 1. rows with no cells are skipped;
//! 2. rows with fewer than four cells, or with any spanned cell, are skipped;
//! 3. the first four cells map to serial, case info, party info, advocate;
//! 4. every field is normalised, with column rules applied in between;
//! 5. rows left entirely blank are skipped.
//!
//! Survivors keep their source order, which is the listing order.

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::pipeline::normalize::clean_field;
use crate::record::{Column, RawRow, Record, RecordSet, RECORD_ARITY};
use tracing::{debug, info};

/// Extract with the default eCourts configuration.
pub fn extract(rows: &[RawRow]) -> Result<RecordSet, ExtractionError> {
    RecordExtractor::default().extract(rows)
}

/// Turns raw rows into records according to an [`ExtractionConfig`].
#[derive(Debug, Clone, Default)]
pub struct RecordExtractor {
    config: ExtractionConfig,
}

/// Why rows were dropped, for the extraction log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub no_cells: usize,
    pub too_short: usize,
    pub spanned: usize,
    pub blank: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.no_cells + self.too_short + self.spanned + self.blank
    }
}

impl RecordExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Build a [`RecordSet`] from `rows`.
    ///
    /// # Errors
    /// [`ExtractionError::NoValidRows`] when no row survives filtering; a
    /// header-only set is never returned.
    pub fn extract(&self, rows: &[RawRow]) -> Result<RecordSet, ExtractionError> {
        let mut skipped = SkipCounts::default();
        let mut records = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            match self.extract_row(row) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!("Skipping row {}: {:?}", idx + 1, reason);
                    match reason {
                        SkipReason::NoCells => skipped.no_cells += 1,
                        SkipReason::TooShort(_) => skipped.too_short += 1,
                        SkipReason::Spanned => skipped.spanned += 1,
                        SkipReason::Blank => skipped.blank += 1,
                    }
                }
            }
        }

        info!(
            "Extracted {} records from {} rows (skipped: {} empty, {} short, {} spanned, {} blank)",
            records.len(),
            rows.len(),
            skipped.no_cells,
            skipped.too_short,
            skipped.spanned,
            skipped.blank
        );

        if records.is_empty() {
            return Err(ExtractionError::NoValidRows {
                total: rows.len(),
                skipped: skipped.total(),
            });
        }

        Ok(RecordSet::new(self.config.header.clone(), records))
    }

    fn extract_row(&self, row: &RawRow) -> Result<Record, SkipReason> {
        if row.is_empty() {
            return Err(SkipReason::NoCells);
        }
        if row.len() < RECORD_ARITY {
            return Err(SkipReason::TooShort(row.len()));
        }
        if row.has_spanned_cell() {
            return Err(SkipReason::Spanned);
        }

        let cells = row.cells();
        let [serial, case_info, party_info, advocate] =
            Column::ALL.map(|col| clean_field(&cells[col.index()].text, self.config.rules_for(col)));
        let record = Record {
            serial,
            case_info,
            party_info,
            advocate,
        };

        if self.config.skip_blank_rows && record.fields().iter().all(|f| f.is_empty()) {
            return Err(SkipReason::Blank);
        }
        Ok(record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    NoCells,
    TooShort(usize),
    Spanned,
    Blank,
}
