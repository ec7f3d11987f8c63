//! Application constants for the listing loader
//!
//! This module contains the listing-format labels, storage schema names,
//! default paths and environment variable names used throughout the crate.

// =============================================================================
// Listing Format Labels
// =============================================================================

/// Listing labels as they appear in the exported text
pub mod labels {
    /// Stem of the order-count word ("ордер", "ордера", "ордеров")
    pub const ORDER_WORD: &str = "ордер";

    /// Label preceding the available quantity
    pub const AVAILABLE: &str = "Доступно";

    /// Label preceding each limit bound
    pub const LIMIT: &str = "Лимит";

    /// Marker closing the payment-methods text
    pub const BUY: &str = "Купить";
}

/// Characters used as thousands separators in exported numbers
pub const THOUSANDS_SEPARATORS: &[char] = &[' ', ',', '\u{a0}', '\u{202f}'];

// =============================================================================
// Storage Schema
// =============================================================================

/// Destination table name
pub const TABLE_NAME: &str = "exchange_rates";

/// Non-key destination columns, in declared order
pub const COLUMN_NAMES: &[&str] = &[
    "name",
    "orders",
    "completed",
    "price",
    "available",
    "limit_lower",
    "limit_upper",
    "ways_to_purchase",
];

// =============================================================================
// Defaults
// =============================================================================

/// Default input export file name
pub const DEFAULT_INPUT_PATH: &str = "results";

/// Default SQLite database file name
pub const DEFAULT_DATABASE_PATH: &str = "db.sqlite";

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "exrates";

/// Config file name within [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Lines between progress bar refreshes
pub const PROGRESS_UPDATE_INTERVAL: u64 = 256;

// =============================================================================
// Environment Variables
// =============================================================================

pub mod env {
    pub const INPUT: &str = "EXRATES_INPUT";
    pub const DATABASE: &str = "EXRATES_DATABASE";
    pub const EMPTY_LINES: &str = "EXRATES_EMPTY_LINES";
}

// =============================================================================
// Exit Codes
// =============================================================================

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const IO_FAILURE: i32 = 1;
    pub const STORAGE_FAILURE: i32 = 2;
    pub const CONFIGURATION_FAILURE: i32 = 3;
    pub const INTERRUPTED: i32 = 130;
}
