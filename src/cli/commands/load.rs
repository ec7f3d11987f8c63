//! Load command implementation
//!
//! Reads the export, runs the ingest pipeline on a blocking thread inside one
//! transaction and reports the run.

use colored::Colorize;
use indicatif::ProgressBar;
use serde::Serialize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::shared::{create_progress_bar, load_configuration, read_listing_export, setup_logging};
use crate::app::services::ingest::{IngestPipeline, IngestStats};
use crate::app::services::listing_extractor::ListingExtractor;
use crate::app::services::sqlite_sink::Store;
use crate::cli::args::{LoadArgs, OutputFormat};
use crate::config::EmptyRecordPolicy;
use crate::constants::TABLE_NAME;
use crate::{Error, Result};

/// Machine-readable result of a load run
#[derive(Debug, Serialize)]
pub struct LoadReport {
    pub input: PathBuf,
    pub database: PathBuf,
    pub empty_lines: EmptyRecordPolicy,
    pub stats: IngestStats,
}

/// Run the load command
pub async fn run_load(args: LoadArgs, cancellation_token: CancellationToken) -> Result<()> {
    setup_logging(&args.verbosity)?;
    args.validate()?;

    let mut config = load_configuration(
        args.input_path.clone(),
        args.database_path.clone(),
        args.config_file.as_deref(),
    )?;
    if let Some(policy) = args.empty_lines {
        config.ingest.empty_lines = policy;
    }

    info!(
        "Loading {} into {}",
        config.input.path.display(),
        config.storage.database_path.display()
    );

    let content = read_listing_export(&config.input.path).await?;
    let total_lines = content.lines().count() as u64;
    info!("Read {} lines", total_lines);

    let progress = if config.ingest.show_progress && args.show_progress() {
        create_progress_bar(total_lines, "Loading listings")
    } else {
        ProgressBar::hidden()
    };

    let pipeline = IngestPipeline::new(ListingExtractor::new()?, config.ingest.empty_lines)
        .with_cancellation(cancellation_token)
        .with_progress(progress.clone());
    debug!("Empty-line policy: {:?}", pipeline.policy());

    let database_path = config.storage.database_path.clone();
    let outcome = tokio::task::spawn_blocking(move || -> Result<IngestStats> {
        let mut store = Store::open(&database_path)?;
        pipeline.ingest(&mut store, content.lines())
    })
    .await
    .map_err(|e| Error::io("Ingest task failed", std::io::Error::other(e)))?;

    progress.finish_and_clear();

    let stats = match outcome {
        Ok(stats) => stats,
        Err(err) => {
            error!("Load failed, nothing committed to {}: {}", TABLE_NAME, err);
            return Err(err);
        }
    };

    let report = LoadReport {
        input: config.input.path,
        database: config.storage.database_path,
        empty_lines: config.ingest.empty_lines,
        stats,
    };

    match args.output_format {
        OutputFormat::Human => print_human_report(&report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::serialization("Failed to encode load report", e))?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_human_report(report: &LoadReport) {
    let stats = &report.stats;

    println!();
    println!("{}", "Load complete".green().bold());
    println!("  Input:            {}", report.input.display());
    println!("  Database:         {}", report.database.display());
    println!("  Lines read:       {}", stats.lines_read);
    println!(
        "  Rows inserted:    {} ({:.1}%)",
        stats.rows_inserted.to_string().green(),
        stats.load_rate()
    );

    if stats.empty_skipped > 0 {
        println!(
            "  Skipped (empty):  {}",
            stats.empty_skipped.to_string().yellow()
        );
    }
    if stats.empty_inserted > 0 {
        println!("  NULL rows:        {}", stats.empty_inserted);
    }
    if stats.coercion_misses > 0 {
        println!(
            "  Coercion misses:  {}",
            stats.coercion_misses.to_string().yellow()
        );
    }

    println!("  Time:             {} ms", stats.processing_time_ms);
    println!();
    println!("{}", "Field matches:".bold());
    for (field, count) in &stats.field_matches {
        println!("  {:<18}{}", field.column_name(), count);
    }
}
