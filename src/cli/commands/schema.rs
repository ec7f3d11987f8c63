//! Schema command implementation

use colored::Colorize;
use tracing::info;

use super::shared::{load_configuration, setup_logging};
use crate::app::services::sqlite_sink::Store;
use crate::app::services::sqlite_sink::schema::declared_columns;
use crate::cli::args::SchemaArgs;
use crate::constants::TABLE_NAME;
use crate::{Error, Result};

/// Run the schema command: create the listing table if missing
pub async fn run_schema(args: SchemaArgs) -> Result<()> {
    setup_logging(&args.verbosity)?;

    let config = load_configuration(None, args.database_path.clone(), args.config_file.as_deref())?;
    let database_path = config.storage.database_path;

    let columns = tokio::task::spawn_blocking(move || -> Result<(Vec<String>, i64)> {
        let store = Store::open(&database_path)?;
        store.ensure_schema()?;
        Ok((declared_columns(store.connection())?, store.row_count()?))
    })
    .await
    .map_err(|e| Error::io("Schema task failed", std::io::Error::other(e)))?;
    let (columns, rows) = columns?;

    info!("Schema ready: {} columns, {} rows", columns.len(), rows);

    println!("{} {}", "Table ready:".green().bold(), TABLE_NAME);
    println!("  Columns: {}", columns.join(", "));
    println!("  Rows:    {}", rows);

    Ok(())
}
