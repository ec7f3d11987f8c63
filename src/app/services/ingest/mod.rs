//! Ingest pipeline from listing export to storage
//!
//! - [`pipeline`] - Sequential extract-and-append loop with interrupt checks
//! - [`stats`] - Per-run counters and line outcomes

pub mod pipeline;
pub mod stats;

#[cfg(test)]
mod tests;

pub use pipeline::IngestPipeline;
pub use stats::{IngestStats, LineOutcome};
