//! Line-to-record extraction
//!
//! Applies the field patterns in fixed order, each against the original
//! line, and collects the named captures into a labeled [`ListingRecord`].

use regex::Captures;
use tracing::trace;

use super::patterns::{LIMIT_AMOUNT_GROUP, LIMIT_OPEN_GROUP, PatternSet};
use crate::Result;
use crate::app::models::{Field, ListingRecord};
use crate::constants::labels;

/// Extracts listing records from raw export lines
///
/// A pattern that does not match leaves its field empty; nothing here fails
/// once the pattern set has compiled.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    patterns: PatternSet,
}

impl ListingExtractor {
    /// Create an extractor with the compiled pattern set
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::compile()?,
        })
    }

    /// Extract one record from one line
    pub fn extract(&self, line: &str) -> ListingRecord {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut record = ListingRecord::new();

        if let Some(name) = self.capture(&self.patterns.name, line, Field::Name) {
            record.set(Field::Name, name);
        }

        let orders = self.patterns.orders.captures(line);
        if let Some(value) = orders.as_ref().and_then(|c| c.name(Field::Orders.column_name())) {
            record.set(Field::Orders, value.as_str());
        }

        let completed = self
            .patterns
            .completed
            .captures(line)
            .and_then(|c| c.name(Field::Completed.column_name()));
        if let Some(value) = completed {
            record.set(Field::Completed, value.as_str());
        }

        // price is searched after the completion rate (or order count) and
        // before the first labeled section
        let price_start = completed
            .map(|m| m.end())
            .or_else(|| orders.as_ref().and_then(|c| c.get(0)).map(|m| m.end()))
            .unwrap_or(0);
        if let Some(price) = self.find_price(line, price_start) {
            record.set(Field::Price, price);
        }

        if let Some(available) = self.capture(&self.patterns.available, line, Field::Available) {
            record.set(Field::Available, available);
        }

        let (lower, upper) = self.find_limits(line);
        if let Some(lower) = lower {
            record.set(Field::LimitLower, lower);
        }
        if let Some(upper) = upper {
            record.set(Field::LimitUpper, upper);
        }

        // an empty payment-method segment counts as absent
        if let Some(ways) = self
            .capture(&self.patterns.ways_to_purchase, line, Field::WaysToPurchase)
            .filter(|ways| !ways.is_empty())
        {
            record.set(Field::WaysToPurchase, ways);
        }

        trace!(
            "Extracted {} of {} fields: {:?}",
            record.field_count(),
            Field::ALL.len(),
            record.present_fields()
        );

        record
    }

    /// Extract every line of an export, one record per line
    pub fn extract_all<'a, I>(&'a self, lines: I) -> impl Iterator<Item = ListingRecord> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        lines.into_iter().map(move |line| self.extract(line))
    }

    fn capture<'l>(&self, re: &regex::Regex, line: &'l str, field: Field) -> Option<&'l str> {
        re.captures(line)
            .and_then(|c| c.name(field.column_name()))
            .map(|m| m.as_str())
    }

    fn find_price<'l>(&self, line: &'l str, start: usize) -> Option<&'l str> {
        let end = [labels::AVAILABLE, labels::LIMIT]
            .iter()
            .filter_map(|label| line[start..].find(label))
            .min()
            .map_or(line.len(), |offset| start + offset);

        self.patterns
            .price
            .captures_at(&line[..end], start)
            .and_then(|c| c.name(Field::Price.column_name()))
            .map(|m| m.as_str())
    }

    /// Lower bound is the first open-range limit, upper bound the last
    /// limit that does not open a range
    fn find_limits<'l>(&self, line: &'l str) -> (Option<&'l str>, Option<&'l str>) {
        let mut lower = None;
        let mut upper = None;

        for caps in self.patterns.limit.captures_iter(line) {
            let Some(amount) = caps.name(LIMIT_AMOUNT_GROUP).map(|m| m.as_str()) else {
                continue;
            };
            if is_open_bound(&caps) {
                lower.get_or_insert(amount);
            } else {
                upper = Some(amount);
            }
        }

        (lower, upper)
    }
}

fn is_open_bound(caps: &Captures<'_>) -> bool {
    caps.name(LIMIT_OPEN_GROUP).is_some()
}
