//! Shared components for CLI commands
//!
//! Logging setup, configuration loading, input reading and progress styling
//! used by more than one command.

use crate::cli::args::Verbosity;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Set up structured logging for a command
pub fn setup_logging(verbosity: &Verbosity) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = verbosity.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("exrates_loader={}", log_level)));

    let result = if verbosity.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Pick the config file: the explicit one, else the default location if it exists
pub fn resolve_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    }
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(
    input_path: Option<PathBuf>,
    database_path: Option<PathBuf>,
    config_file: Option<&Path>,
) -> Result<Config> {
    let config_file = resolve_config_file(config_file);

    match &config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }

    let config = Config::load_layered(input_path, database_path, config_file.as_deref())?;
    config.validate()?;

    debug!(
        "Resolved input {} and database {}",
        config.input.path.display(),
        config.storage.database_path.display()
    );
    Ok(config)
}

/// Read the whole listing export into memory
///
/// A missing file maps to [`Error::FileNotFound`]; any other failure,
/// including invalid UTF-8, is an I/O error.
pub async fn read_listing_export(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            debug!("Read {} bytes from {}", content.len(), path.display());
            Ok(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::file_not_found(path.display().to_string()))
        }
        Err(e) => Err(Error::io(
            format!("Failed to read input {}", path.display()),
            e,
        )),
    }
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[tokio::test]
    async fn test_read_missing_export_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("results");

        let err = read_listing_export(&missing).await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_read_invalid_utf8_is_io_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = read_listing_export(file.path()).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn test_read_export_keeps_content() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "trader;5 ордер;99.10;;91.20;Купить").unwrap();

        let content = read_listing_export(file.path()).await.unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_explicit_config_file_wins() {
        let path = PathBuf::from("/tmp/exrates-explicit.json");
        assert_eq!(resolve_config_file(Some(path.as_path())), Some(path));
    }

    #[test]
    fn test_cli_paths_override_defaults() {
        let config = load_configuration(
            Some(PathBuf::from("export.txt")),
            Some(PathBuf::from("rates.sqlite")),
            None,
        )
        .unwrap();

        assert_eq!(config.input.path, PathBuf::from("export.txt"));
        assert_eq!(config.storage.database_path, PathBuf::from("rates.sqlite"));
    }

    #[test]
    fn test_progress_bar_length() {
        let pb = create_progress_bar(42, "Loading");
        assert_eq!(pb.length(), Some(42));
    }
}
