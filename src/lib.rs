//! Exchange-Rate Listing Loader Library
//!
//! A Rust library for turning flat, semicolon-delimited exports of P2P
//! exchange-rate listings into rows of a SQLite `exchange_rates` table.
//!
//! This library provides tools for:
//! - Extracting labeled listing records from raw lines with anchored patterns
//! - Coercing locale-formatted numbers into typed columns
//! - Loading a whole export inside a single all-or-nothing transaction
//! - Per-line outcome tracking for run reports

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod ingest;
        pub mod listing_extractor;
        pub mod sqlite_sink;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Field, ListingRecord};
pub use config::Config;

/// Result type alias for the loader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for extraction, configuration and storage operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// SQLite operation failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Projected value count does not match the destination column count
    #[error("Arity mismatch for table {table}: expected {expected} values, found {found}")]
    Arity {
        table: String,
        expected: usize,
        found: usize,
    },

    /// A field pattern failed to compile
    #[error("Invalid pattern for field '{field}'")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON serialization or deserialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a database error with context
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Create an arity mismatch error
    pub fn arity(table: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::Arity {
            table: table.into(),
            expected,
            found,
        }
    }

    /// Create a pattern compilation error
    pub fn pattern(field: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            field: field.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Process exit code for this error
    ///
    /// 1 = I/O failure, 2 = schema/insert failure, 3 = configuration failure,
    /// 130 = interrupted.
    pub fn exit_code(&self) -> i32 {
        use constants::exit_codes;

        match self {
            Self::Io { .. } | Self::FileNotFound { .. } | Self::Serialization { .. } => {
                exit_codes::IO_FAILURE
            }
            Self::Database { .. } | Self::Arity { .. } => exit_codes::STORAGE_FAILURE,
            Self::Pattern { .. } | Self::Configuration { .. } => {
                exit_codes::CONFIGURATION_FAILURE
            }
            Self::ProcessingInterrupted { .. } => exit_codes::INTERRUPTED,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database {
            message: "SQLite operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_failure_class() {
        let io = Error::io("read", std::io::Error::other("boom"));
        assert_eq!(io.exit_code(), 1);
        assert_eq!(Error::file_not_found("results").exit_code(), 1);
        assert_eq!(Error::arity("exchange_rates", 8, 3).exit_code(), 2);
        assert_eq!(Error::from(rusqlite::Error::InvalidQuery).exit_code(), 2);
        assert_eq!(Error::configuration("bad").exit_code(), 3);
        assert_eq!(Error::processing_interrupted("ctrl-c").exit_code(), 130);
    }

    #[test]
    fn test_arity_message_names_counts() {
        let err = Error::arity("exchange_rates", 8, 0);
        let message = err.to_string();
        assert!(message.contains("exchange_rates"));
        assert!(message.contains("expected 8"));
        assert!(message.contains("found 0"));
    }
}
