//! Ingest statistics and per-line outcome tracking

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::app::models::{Field, ListingRecord};

/// What happened to one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOutcome {
    /// A row was written for the line
    Inserted,
    /// The line produced an empty record and was skipped
    SkippedEmpty,
}

/// Counters for one ingest run
#[derive(Debug, Clone, Serialize)]
pub struct IngestStats {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Lines read from the input
    pub lines_read: usize,

    /// Rows written to storage (committed only if the run succeeds)
    pub rows_inserted: usize,

    /// Lines skipped because nothing could be extracted
    pub empty_skipped: usize,

    /// Rows written for empty lines under the NULL-row policy
    pub empty_inserted: usize,

    /// Values present in the line but not convertible to their column type
    pub coercion_misses: usize,

    /// How many lines matched each field
    pub field_matches: BTreeMap<Field, usize>,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
}

impl IngestStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            lines_read: 0,
            rows_inserted: 0,
            empty_skipped: 0,
            empty_inserted: 0,
            coercion_misses: 0,
            field_matches: Field::ALL.iter().map(|&f| (f, 0)).collect(),
            processing_time_ms: 0,
        }
    }

    /// Count the fields a record matched
    pub fn record_fields(&mut self, record: &ListingRecord) {
        for field in record.present_fields() {
            *self.field_matches.entry(field).or_insert(0) += 1;
        }
    }

    /// Count a line's outcome
    pub fn record_outcome(&mut self, outcome: LineOutcome, empty: bool) {
        match outcome {
            LineOutcome::Inserted => {
                self.rows_inserted += 1;
                if empty {
                    self.empty_inserted += 1;
                }
            }
            LineOutcome::SkippedEmpty => self.empty_skipped += 1,
        }
    }

    /// Matches for one field
    pub fn matches_for(&self, field: Field) -> usize {
        self.field_matches.get(&field).copied().unwrap_or(0)
    }

    /// Share of lines that produced a row, as a percentage
    pub fn load_rate(&self) -> f64 {
        if self.lines_read == 0 {
            0.0
        } else {
            (self.rows_inserted as f64 / self.lines_read as f64) * 100.0
        }
    }

    /// "N of M lines loaded" summary
    pub fn summary(&self) -> String {
        format!(
            "{} of {} lines loaded ({} skipped as empty, {} coercion misses)",
            self.rows_inserted, self.lines_read, self.empty_skipped, self.coercion_misses
        )
    }
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}
