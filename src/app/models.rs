//! Data models for exchange-rate listings
//!
//! This module contains the labeled listing record produced by the extractor
//! and the field identities used to project it onto storage columns.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Field Identity
// =============================================================================

/// Storage type of a listing field's column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
}

impl ColumnKind {
    /// SQLite type name used in the table declaration
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnKind::Text => "TEXT",
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
        }
    }
}

/// One of the eight listing fields, in extraction and column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Orders,
    Completed,
    Price,
    Available,
    LimitLower,
    LimitUpper,
    WaysToPurchase,
}

impl Field {
    /// All fields in extraction order
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Orders,
        Field::Completed,
        Field::Price,
        Field::Available,
        Field::LimitLower,
        Field::LimitUpper,
        Field::WaysToPurchase,
    ];

    /// Column name in the `exchange_rates` table
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Orders => "orders",
            Field::Completed => "completed",
            Field::Price => "price",
            Field::Available => "available",
            Field::LimitLower => "limit_lower",
            Field::LimitUpper => "limit_upper",
            Field::WaysToPurchase => "ways_to_purchase",
        }
    }

    pub fn column_kind(&self) -> ColumnKind {
        match self {
            Field::Name | Field::WaysToPurchase => ColumnKind::Text,
            Field::Orders => ColumnKind::Integer,
            Field::Completed
            | Field::Price
            | Field::Available
            | Field::LimitLower
            | Field::LimitUpper => ColumnKind::Real,
        }
    }

    /// Position of this field in [`Field::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.column_name() == s.trim())
            .ok_or_else(|| Error::configuration(format!("Unknown listing field '{}'", s)))
    }
}

// =============================================================================
// Listing Record
// =============================================================================

/// Labeled record extracted from one listing line
///
/// Every value is the raw sub-string matched in the line; coercion to the
/// column types happens in the sink. Absent fields stay `None` and are
/// stored as NULL, so a missing early field never shifts later columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub name: Option<String>,
    pub orders: Option<String>,
    pub completed: Option<String>,
    pub price: Option<String>,
    pub available: Option<String>,
    pub limit_lower: Option<String>,
    pub limit_upper: Option<String>,
    pub ways_to_purchase: Option<String>,
}

impl ListingRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value of a field
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set the raw value of a field, replacing any previous value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder-style variant of [`ListingRecord::set`]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate over all fields in column order with their optional values
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Fields that matched, in column order
    pub fn present_fields(&self) -> Vec<Field> {
        self.iter()
            .filter_map(|(field, value)| value.map(|_| field))
            .collect()
    }

    /// Number of fields that matched
    pub fn field_count(&self) -> usize {
        self.iter().filter(|(_, value)| value.is_some()).count()
    }

    /// True when no pattern matched
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Matched values in field order with absent fields dropped
    ///
    /// This is the legacy positional projection: a value's column can only be
    /// recovered from its position when every earlier field matched. Storage
    /// never binds through this view.
    pub fn sparse_values(&self) -> Vec<&str> {
        self.iter().filter_map(|(_, value)| value).collect()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Orders => &self.orders,
            Field::Completed => &self.completed,
            Field::Price => &self.price,
            Field::Available => &self.available,
            Field::LimitLower => &self.limit_lower,
            Field::LimitUpper => &self.limit_upper,
            Field::WaysToPurchase => &self.ways_to_purchase,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Orders => &mut self.orders,
            Field::Completed => &mut self.completed,
            Field::Price => &mut self.price,
            Field::Available => &mut self.available,
            Field::LimitLower => &mut self.limit_lower,
            Field::LimitUpper => &mut self.limit_upper,
            Field::WaysToPurchase => &mut self.ways_to_purchase,
        }
    }
}
