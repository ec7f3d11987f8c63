//! SQLite sink for labeled listing records
//!
//! ## Architecture
//!
//! - [`schema`] - `exchange_rates` DDL, insert statement and column introspection
//! - [`coercion`] - Raw text to typed column values
//! - [`sink`] - The [`RecordSink`] contract and its SQLite implementation
//! - [`store`] - Connection ownership and the per-run transaction scope
//!
//! ## Usage
//!
//! ```rust
//! use exrates_loader::app::services::sqlite_sink::{RecordSink, Store};
//! use exrates_loader::{Field, ListingRecord};
//!
//! # fn example() -> exrates_loader::Result<()> {
//! let mut store = Store::open_in_memory()?;
//! store.ensure_schema()?;
//! store.batch(|sink| {
//!     sink.append(&ListingRecord::new().with(Field::Name, "trader"))?;
//!     Ok(())
//! })?;
//! assert_eq!(store.row_count()?, 1);
//! # Ok(())
//! # }
//! ```

pub mod coercion;
pub mod schema;
pub mod sink;
pub mod store;

pub use sink::{AppendReceipt, RecordSink, SqliteSink};
pub use store::Store;
