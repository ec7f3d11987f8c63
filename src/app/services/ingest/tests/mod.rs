//! Test utilities for the ingest pipeline
//!
//! Provides sink wrappers that interrupt or fail part-way through a batch,
//! used to check that nothing from an aborted run is committed.

use tokio_util::sync::CancellationToken;

use crate::app::models::ListingRecord;
use crate::app::services::listing_extractor::ListingExtractor;
use crate::app::services::sqlite_sink::{AppendReceipt, RecordSink, Store};
use crate::config::EmptyRecordPolicy;
use crate::{Error, Result};

use super::IngestPipeline;


pub const EXPORT: &[&str] = &[
    "CryptoKing;148 ордеров;97.30%;;92.45;Доступно;1 250.75 USDT;Лимит;₽;5 000.00;-Лимит;₽;115 590.00;Тинькофф;СБП;Купить",
    "",
    "FastSwap;3 ордера;100.00;;92.60;Доступно;80.00 USDT;Лимит;₽;500.00;-Лимит;₽;7 400.00;Райффайзен;Купить",
    "   ",
    "NewTrader;;93.10;Доступно;320.00 USDT;Лимит;₽;1 000.00;-Лимит;₽;29 500.00;Сбербанк;Купить",
];

pub fn pipeline(policy: EmptyRecordPolicy) -> IngestPipeline {
    let extractor = ListingExtractor::new().expect("listing patterns should compile");
    IngestPipeline::new(extractor, policy)
}

pub fn store() -> Store {
    let store = Store::open_in_memory().expect("in-memory store should open");
    store.ensure_schema().expect("schema should be created");
    store
}

/// Sink that cancels a token after a number of appends
pub struct InterruptingSink<'a, S: RecordSink> {
    pub inner: &'a mut S,
    pub cancellation_token: CancellationToken,
    pub after: usize,
    pub appended: usize,
}

impl<S: RecordSink> RecordSink for InterruptingSink<'_, S> {
    fn ensure_schema(&mut self) -> Result<()> {
        self.inner.ensure_schema()
    }

    fn append(&mut self, record: &ListingRecord) -> Result<AppendReceipt> {
        let receipt = self.inner.append(record)?;
        self.appended += 1;
        if self.appended >= self.after {
            self.cancellation_token.cancel();
        }
        Ok(receipt)
    }
}

/// Sink whose appends fail after a number of successes
pub struct FailingSink<'a, S: RecordSink> {
    pub inner: &'a mut S,
    pub succeed: usize,
}

impl<S: RecordSink> RecordSink for FailingSink<'_, S> {
    fn ensure_schema(&mut self) -> Result<()> {
        self.inner.ensure_schema()
    }

    fn append(&mut self, record: &ListingRecord) -> Result<AppendReceipt> {
        if self.succeed == 0 {
            return Err(Error::arity("exchange_rates", 8, 0));
        }
        self.succeed -= 1;
        self.inner.append(record)
    }
}

/// Sink that keeps appended records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub schema_calls: usize,
    pub records: Vec<ListingRecord>,
}

impl RecordSink for MemorySink {
    fn ensure_schema(&mut self) -> Result<()> {
        self.schema_calls += 1;
        Ok(())
    }

    fn append(&mut self, record: &ListingRecord) -> Result<AppendReceipt> {
        self.records.push(record.clone());
        Ok(AppendReceipt::default())
    }
}
