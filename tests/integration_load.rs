//! Integration tests for loading listing exports into a SQLite file
//!
//! These tests drive the public library API end to end: extractor, ingest
//! pipeline and store, against a temporary database on disk.

use anyhow::Result;
use exrates_loader::app::services::ingest::IngestPipeline;
use exrates_loader::app::services::listing_extractor::ListingExtractor;
use exrates_loader::app::services::sqlite_sink::Store;
use exrates_loader::cli::commands::shared::read_listing_export;
use exrates_loader::config::EmptyRecordPolicy;
use exrates_loader::{Error, Field};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Listing with known literal values and payment methods containing `;` and quotes
const CRAFTED_LINE: &str = "Alpha Trader;42 ордера;98.50%;;91.75;Доступно;2 500.00 USDT;Лимит;₽;1 000.00;-Лимит;₽;50 000.00;Тинькофф;\"СБП\";Купить";

fn pipeline(policy: EmptyRecordPolicy) -> Result<IngestPipeline> {
    Ok(IngestPipeline::new(ListingExtractor::new()?, policy))
}

#[derive(Debug, PartialEq)]
struct StoredRow {
    name: Option<String>,
    orders: Option<i64>,
    completed: Option<f64>,
    price: Option<f64>,
    available: Option<f64>,
    limit_lower: Option<f64>,
    limit_upper: Option<f64>,
    ways_to_purchase: Option<String>,
}

fn stored_rows(store: &Store) -> Result<Vec<StoredRow>> {
    let mut stmt = store.connection().prepare(
        "SELECT name, orders, completed, price, available, limit_lower, limit_upper, ways_to_purchase \
         FROM exchange_rates ORDER BY id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StoredRow {
                name: row.get(0)?,
                orders: row.get(1)?,
                completed: row.get(2)?,
                price: row.get(3)?,
                available: row.get(4)?,
                limit_lower: row.get(5)?,
                limit_upper: row.get(6)?,
                ways_to_purchase: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[test]
fn test_crafted_line_round_trips_literal_values() -> Result<()> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("db.sqlite");

    let mut store = Store::open(&db_path)?;
    let stats = pipeline(EmptyRecordPolicy::Skip)?.ingest(&mut store, [CRAFTED_LINE])?;
    assert_eq!(stats.rows_inserted, 1);
    assert_eq!(stats.coercion_misses, 0);
    drop(store);

    // reopen to read what was actually committed
    let store = Store::open(&db_path)?;
    let rows = stored_rows(&store)?;
    assert_eq!(
        rows,
        vec![StoredRow {
            name: Some("Alpha Trader".to_string()),
            orders: Some(42),
            completed: Some(98.5),
            price: Some(91.75),
            available: Some(2500.0),
            limit_lower: Some(1000.0),
            limit_upper: Some(50000.0),
            ways_to_purchase: Some("Тинькофф;\"СБП\"".to_string()),
        }]
    );
    Ok(())
}

#[test]
fn test_ensure_schema_is_idempotent_on_populated_table() -> Result<()> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("db.sqlite");

    let mut store = Store::open(&db_path)?;
    pipeline(EmptyRecordPolicy::Skip)?.ingest(&mut store, [CRAFTED_LINE, CRAFTED_LINE])?;
    let before = stored_rows(&store)?;

    store.ensure_schema()?;
    store.ensure_schema()?;

    assert_eq!(store.row_count()?, 2);
    assert_eq!(stored_rows(&store)?, before);
    Ok(())
}

#[test]
fn test_repeated_loads_append() -> Result<()> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("db.sqlite");
    let pipeline = pipeline(EmptyRecordPolicy::Skip)?;

    for _ in 0..2 {
        let mut store = Store::open(&db_path)?;
        pipeline.ingest(&mut store, [CRAFTED_LINE])?;
    }

    let store = Store::open(&db_path)?;
    assert_eq!(store.row_count()?, 2);
    Ok(())
}

#[test]
fn test_hostile_text_is_stored_verbatim() -> Result<()> {
    let line = "O'Brien\"); DROP TABLE exchange_rates;--;7 ордеров;99.00;;90.10;Лимит;$;10.00;-Лимит;$;900.00;Bank 'A'; \"B\";Купить";
    let extractor = ListingExtractor::new()?;
    let record = extractor.extract(line);
    let name = record.get(Field::Name).map(str::to_string);
    let ways = record.get(Field::WaysToPurchase).map(str::to_string);
    assert!(name.is_some());
    assert!(ways.is_some());

    let mut store = Store::open_in_memory()?;
    pipeline(EmptyRecordPolicy::Skip)?.ingest(&mut store, [line])?;

    let rows = stored_rows(&store)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, name);
    assert_eq!(rows[0].ways_to_purchase, ways);
    Ok(())
}

#[test]
fn test_null_policy_rows_are_all_null() -> Result<()> {
    let mut store = Store::open_in_memory()?;
    pipeline(EmptyRecordPolicy::InsertNulls)?.ingest(&mut store, ["no listing here"])?;

    let rows = stored_rows(&store)?;
    assert_eq!(
        rows,
        vec![StoredRow {
            name: None,
            orders: None,
            completed: None,
            price: None,
            available: None,
            limit_lower: None,
            limit_upper: None,
            ways_to_purchase: None,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_export_file_loads_in_order() -> Result<()> {
    let mut export = NamedTempFile::new()?;
    writeln!(export, "{}", CRAFTED_LINE)?;
    writeln!(export)?;
    writeln!(
        export,
        "Beta;3 ордера;100.00;;92.60;Доступно;80.00 USDT;Лимит;₽;500.00;-Лимит;₽;7 400.00;Райффайзен;Купить"
    )?;

    let content = read_listing_export(export.path()).await?;
    let mut store = Store::open_in_memory()?;
    let stats = pipeline(EmptyRecordPolicy::Skip)?.ingest(&mut store, content.lines())?;

    assert_eq!(stats.lines_read, 3);
    assert_eq!(stats.rows_inserted, 2);
    assert_eq!(stats.empty_skipped, 1);

    let names: Vec<_> = stored_rows(&store)?.into_iter().map(|r| r.name).collect();
    assert_eq!(
        names,
        vec![Some("Alpha Trader".to_string()), Some("Beta".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_export_fails_before_storage() -> Result<()> {
    let dir = TempDir::new()?;
    let err = read_listing_export(&dir.path().join("results"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!dir.path().join("db.sqlite").exists());
    Ok(())
}
