//! Sequential line-by-line ingest
//!
//! Lines are extracted and appended strictly in input order. The pipeline
//! checks a shared cancellation token before every line; a cancelled or
//! failed run returns `Err`, which makes [`Store::batch`] roll back.

use indicatif::ProgressBar;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::stats::{IngestStats, LineOutcome};
use crate::app::services::listing_extractor::ListingExtractor;
use crate::app::services::sqlite_sink::{RecordSink, Store};
use crate::config::EmptyRecordPolicy;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::{Error, Result};

/// Drives the extractor over an export and feeds a sink
pub struct IngestPipeline {
    extractor: ListingExtractor,
    policy: EmptyRecordPolicy,
    cancellation_token: CancellationToken,
    progress: ProgressBar,
}

impl IngestPipeline {
    pub fn new(extractor: ListingExtractor, policy: EmptyRecordPolicy) -> Self {
        Self {
            extractor,
            policy,
            cancellation_token: CancellationToken::new(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Share an externally owned token (e.g. cancelled from a Ctrl-C handler)
    pub fn with_cancellation(mut self, cancellation_token: CancellationToken) -> Self {
        self.cancellation_token = cancellation_token;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Token that stops the run before the next line when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn policy(&self) -> EmptyRecordPolicy {
        self.policy
    }

    /// Extract and append every line
    ///
    /// Ensures the sink's schema first. Returns on the first storage error
    /// or cancellation; rows already appended are the caller's to roll back.
    pub fn run<I, L, S>(&self, lines: I, sink: &mut S) -> Result<IngestStats>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
        S: RecordSink + ?Sized,
    {
        let start = Instant::now();
        let mut stats = IngestStats::new();

        sink.ensure_schema()?;

        for (index, line) in lines.into_iter().enumerate() {
            let line_no = index + 1;

            if self.cancellation_token.is_cancelled() {
                return Err(Error::processing_interrupted(format!(
                    "Interrupted before line {} ({} rows pending, not committed)",
                    line_no, stats.rows_inserted
                )));
            }

            let record = self.extractor.extract(line.as_ref());
            stats.lines_read += 1;
            stats.record_fields(&record);

            let empty = record.is_empty();
            let outcome = if empty && self.policy == EmptyRecordPolicy::Skip {
                warn!("Line {}: no fields extracted, skipping", line_no);
                LineOutcome::SkippedEmpty
            } else {
                let receipt = sink.append(&record)?;
                stats.coercion_misses += receipt.coercion_misses.len();
                debug!(
                    "Line {}: inserted {} of 8 fields",
                    line_no,
                    record.field_count()
                );
                LineOutcome::Inserted
            };
            stats.record_outcome(outcome, empty);

            if line_no as u64 % PROGRESS_UPDATE_INTERVAL == 0 {
                self.progress.set_position(line_no as u64);
            }
        }

        self.progress.set_position(stats.lines_read as u64);
        stats.processing_time_ms = start.elapsed().as_millis() as u64;
        info!("{}", stats.summary());

        Ok(stats)
    }

    /// Run the whole export inside one transaction of `store`
    pub fn ingest<I, L>(&self, store: &mut Store, lines: I) -> Result<IngestStats>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        store.batch(|sink| self.run(lines, sink))
    }
}
