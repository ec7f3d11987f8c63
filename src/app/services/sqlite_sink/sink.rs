//! Record sinks
//!
//! A sink appends one labeled record as one row. [`SqliteSink`] projects
//! the record onto the declared columns by field name and binds every value
//! as a statement parameter.

use rusqlite::Connection;
use rusqlite::types::Value;
use tracing::debug;

use super::coercion::{Coercion, coerce};
use super::schema;
use crate::app::models::{Field, ListingRecord};
use crate::constants::TABLE_NAME;
use crate::{Error, Result};

/// Outcome of a single append
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendReceipt {
    /// Fields whose raw value could not be converted and were stored as NULL
    pub coercion_misses: Vec<Field>,
}

/// Destination for extracted listing records
pub trait RecordSink {
    /// Create the destination table if it does not exist
    fn ensure_schema(&mut self) -> Result<()>;

    /// Write exactly one row for `record`
    fn append(&mut self, record: &ListingRecord) -> Result<AppendReceipt>;
}

/// Sink writing to the `exchange_rates` table through a borrowed connection
///
/// Usually borrowed from a [`super::Store::batch`] transaction so every
/// append of a run commits or rolls back together.
pub struct SqliteSink<'c> {
    conn: &'c Connection,
    insert_sql: String,
    declared: Option<Vec<String>>,
}

impl<'c> SqliteSink<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            insert_sql: schema::insert_sql(),
            declared: None,
        }
    }

    /// Project a record onto the insert's column order
    fn project(record: &ListingRecord) -> (Vec<Value>, Vec<Field>) {
        let mut values = Vec::with_capacity(Field::ALL.len());
        let mut misses = Vec::new();

        for (field, raw) in record.iter() {
            let (value, outcome) = coerce(field, raw);
            if outcome == Coercion::Failed {
                debug!("Could not convert {} value {:?}, storing NULL", field, raw);
                misses.push(field);
            }
            values.push(value);
        }

        (values, misses)
    }

    /// Check the projected values against the table's declared columns
    fn check_arity(&mut self, values: &[Value]) -> Result<()> {
        if self.declared.is_none() {
            self.declared = Some(schema::declared_columns(self.conn)?);
        }
        let declared = self.declared.as_deref().unwrap_or_default();

        let expected: Vec<&str> = Field::ALL.iter().map(|f| f.column_name()).collect();
        if declared.len() != values.len() || declared.iter().zip(&expected).any(|(d, e)| d != e) {
            return Err(Error::arity(TABLE_NAME, declared.len(), values.len()));
        }
        Ok(())
    }
}

impl RecordSink for SqliteSink<'_> {
    fn ensure_schema(&mut self) -> Result<()> {
        schema::ensure_schema(self.conn)?;
        self.declared = None;
        Ok(())
    }

    fn append(&mut self, record: &ListingRecord) -> Result<AppendReceipt> {
        let (values, coercion_misses) = Self::project(record);
        self.check_arity(&values)?;

        let mut stmt = self
            .conn
            .prepare_cached(&self.insert_sql)
            .map_err(|e| Error::database(format!("Failed to prepare insert into {TABLE_NAME}"), e))?;
        stmt.execute(rusqlite::params_from_iter(values.iter()))
            .map_err(|e| Error::database(format!("Failed to insert into {TABLE_NAME}"), e))?;

        Ok(AppendReceipt { coercion_misses })
    }
}
