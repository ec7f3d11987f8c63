//! Scoped SQLite storage handle
//!
//! The connection is opened once per run. [`Store::batch`] hands out a sink
//! bound to a single transaction: the transaction commits when the closure
//! returns `Ok` and rolls back on `Err` or unwind.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema;
use super::sink::SqliteSink;
use crate::constants::TABLE_NAME;
use crate::{Error, Result};

/// Owner of the run's database connection
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| {
            Error::database(format!("Failed to open database {}", path.display()), e)
        })?;
        debug!("Opened database {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database("Failed to open in-memory database", e))?;
        Ok(Self { conn, path: None })
    }

    /// Database file path, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Create the listing table if it does not exist
    pub fn ensure_schema(&self) -> Result<()> {
        schema::ensure_schema(&self.conn)
    }

    /// Run `f` against a sink inside one transaction
    pub fn batch<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteSink<'_>) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| Error::database("Failed to begin transaction", e))?;

        let result = {
            let mut sink = SqliteSink::new(&tx);
            f(&mut sink)
        };

        match result {
            Ok(value) => {
                tx.commit()
                    .map_err(|e| Error::database("Failed to commit transaction", e))?;
                info!("Committed batch to {}", TABLE_NAME);
                Ok(value)
            }
            Err(err) => {
                warn!("Rolling back batch: {}", err);
                if let Err(rollback_err) = tx.rollback() {
                    warn!("Rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Number of rows currently in the listing table
    pub fn row_count(&self) -> Result<i64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| {
                row.get(0)
            })
            .map_err(|e| Error::database(format!("Failed to count rows in {TABLE_NAME}"), e))
    }

    /// Borrow the underlying connection for read-only queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Field, ListingRecord};
    use crate::app::services::sqlite_sink::RecordSink;

    #[test]
    fn test_batch_commits_on_ok() {
        let mut store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();

        let written = store
            .batch(|sink| {
                sink.append(&ListingRecord::new().with(Field::Name, "a"))?;
                sink.append(&ListingRecord::new().with(Field::Name, "b"))?;
                Ok(2)
            })
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.row_count().unwrap(), 2);
    }

    #[test]
    fn test_batch_rolls_back_on_err() {
        let mut store = Store::open_in_memory().unwrap();
        store.ensure_schema().unwrap();

        let result: Result<()> = store.batch(|sink| {
            sink.append(&ListingRecord::new().with(Field::Name, "a"))?;
            Err(Error::processing_interrupted("test"))
        });

        assert!(result.is_err());
        assert_eq!(store.row_count().unwrap(), 0);
    }

    #[test]
    fn test_in_memory_store_has_no_path() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.path().is_none());
    }
}
