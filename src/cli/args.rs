//! Command-line argument definitions for the listing loader
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::EmptyRecordPolicy;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the exchange-rate listing loader
///
/// Extracts structured listings from a flat text export and loads them into
/// the `exchange_rates` table of a SQLite database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "exrates",
    version,
    about = "Load exchange-rate listing exports into SQLite",
    long_about = "Reads a newline-separated export of P2P exchange-rate listings, extracts name, \
                  order count, completion rate, price, available quantity, limits and payment \
                  methods from each line, and appends one row per listing to the exchange_rates \
                  table in a single transaction."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract every line and load it into the database (main command)
    Load(LoadArgs),
    /// Extract every line and print the records without touching storage
    Inspect(InspectArgs),
    /// Create the exchange_rates table if it does not exist
    Schema(SchemaArgs),
}

/// Arguments for the load command
#[derive(Debug, Clone, Parser)]
pub struct LoadArgs {
    /// Listing export to read
    ///
    /// If not specified, uses the configured input (default: ./results)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Listing export to read"
    )]
    pub input_path: Option<PathBuf>,

    /// SQLite database to write
    ///
    /// Created if it doesn't exist. If not specified, uses the configured
    /// database (default: ./db.sqlite)
    #[arg(
        short = 'd',
        long = "database",
        value_name = "FILE",
        help = "SQLite database to write"
    )]
    pub database_path: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/exrates/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// What to do with lines from which nothing could be extracted
    #[arg(
        long = "empty-lines",
        value_enum,
        help = "Skip empty lines or store them as all-NULL rows"
    )]
    pub empty_lines: Option<EmptyRecordPolicy>,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Listing export to read
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Listing export to read"
    )]
    pub input_path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for extracted records
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for extracted records"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Arguments for the schema command
#[derive(Debug, Clone, Parser)]
pub struct SchemaArgs {
    /// SQLite database to prepare
    #[arg(
        short = 'd',
        long = "database",
        value_name = "FILE",
        help = "SQLite database to prepare"
    )]
    pub database_path: Option<PathBuf>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

/// Logging verbosity shared by all commands
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Verbosity {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Result<Commands> {
        self.command
            .clone()
            .ok_or_else(|| Error::configuration("No command specified"))
    }
}

impl Verbosity {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl LoadArgs {
    /// Validate the load command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(input_path) = &self.input_path {
            if input_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is a directory: {}",
                    input_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.verbosity.quiet && self.output_format == OutputFormat::Human
    }
}
