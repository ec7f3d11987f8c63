//! `exchange_rates` table definition and column introspection

use rusqlite::Connection;
use tracing::debug;

use crate::app::models::Field;
use crate::constants::TABLE_NAME;
use crate::{Error, Result};

/// `CREATE TABLE IF NOT EXISTS` statement for the listing table
pub fn create_table_sql() -> String {
    let columns: Vec<String> = Field::ALL
        .iter()
        .map(|field| format!("    {} {}", field.column_name(), field.column_kind().sql_type()))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n{}\n)",
        columns.join(",\n")
    )
}

/// Parameterized insert over every non-key column, in declared order
pub fn insert_sql() -> String {
    let columns: Vec<&str> = Field::ALL.iter().map(|f| f.column_name()).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

    format!(
        "INSERT INTO {TABLE_NAME} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Create the listing table if it does not exist
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(&create_table_sql())
        .map_err(|e| Error::database(format!("Failed to create table {TABLE_NAME}"), e))?;
    debug!("Schema ensured for table {}", TABLE_NAME);
    Ok(())
}

/// Names of the table's non-key columns in declaration order
///
/// Empty when the table does not exist.
pub fn declared_columns(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({TABLE_NAME})"))
        .map_err(|e| Error::database("Failed to inspect table columns", e))?;

    let rows = stmt
        .query_map([], |row| {
            let name: String = row.get(1)?;
            let pk: i64 = row.get(5)?;
            Ok((name, pk))
        })
        .map_err(|e| Error::database("Failed to inspect table columns", e))?;

    let mut columns = Vec::new();
    for row in rows {
        let (name, pk) = row.map_err(|e| Error::database("Failed to read column info", e))?;
        if pk == 0 {
            columns.push(name);
        }
    }
    Ok(columns)
}
