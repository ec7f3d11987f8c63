//! Inspect command implementation
//!
//! Extracts every line of the export and prints the labeled records without
//! opening a database.

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use super::shared::{load_configuration, read_listing_export, setup_logging};
use crate::app::models::ListingRecord;
use crate::app::services::ingest::IngestStats;
use crate::app::services::listing_extractor::ListingExtractor;
use crate::cli::args::{InspectArgs, OutputFormat};
use crate::{Error, Result};

/// One extracted line, as printed in JSON output
#[derive(Debug, Serialize)]
pub struct InspectedLine<'a> {
    pub line: usize,
    pub record: &'a ListingRecord,
}

/// Run the inspect command
pub async fn run_inspect(args: InspectArgs) -> Result<()> {
    setup_logging(&args.verbosity)?;

    let config = load_configuration(args.input_path.clone(), None, args.config_file.as_deref())?;
    info!("Inspecting {}", config.input.path.display());

    let content = read_listing_export(&config.input.path).await?;
    let extractor = ListingExtractor::new()?;

    let mut stats = IngestStats::new();
    for (index, record) in extractor.extract_all(content.lines()).enumerate() {
        let line = index + 1;
        stats.lines_read += 1;
        stats.record_fields(&record);

        match args.output_format {
            OutputFormat::Human => print_human_record(line, &record),
            OutputFormat::Json => {
                let json = serde_json::to_string(&InspectedLine {
                    line,
                    record: &record,
                })
                .map_err(|e| Error::serialization(format!("Failed to encode line {}", line), e))?;
                println!("{}", json);
            }
        }
    }

    if args.output_format == OutputFormat::Human {
        println!("{}", "Field matches:".bold());
        for (field, count) in &stats.field_matches {
            println!(
                "  {:<18}{} of {}",
                field.column_name(),
                count,
                stats.lines_read
            );
        }
    }

    Ok(())
}

fn print_human_record(line: usize, record: &ListingRecord) {
    if record.is_empty() {
        println!("{} {}", format!("Line {}:", line).bold(), "no fields".yellow());
        return;
    }

    println!("{}", format!("Line {}:", line).bold());
    for (field, value) in record.iter() {
        match value {
            Some(value) => println!("  {:<18}{}", field.column_name(), value),
            None => println!("  {:<18}{}", field.column_name(), "-".dimmed()),
        }
    }
}
