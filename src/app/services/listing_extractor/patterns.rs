//! Field pattern sources for listing lines
//!
//! Every pattern names its capture group after the field it yields and is
//! anchored on a label or on punctuation so neighbouring numeric fields
//! cannot alias each other.

use regex::{Regex, escape};

use crate::app::models::Field;
use crate::constants::labels;
use crate::{Error, Result};

/// Decimal with optional thousands grouping, e.g. `1 250.75` or `5,000.00`
const GROUPED_DECIMAL: &str = r"\d[\d ,\x{A0}\x{202F}]*\.\d+";

/// Integer with optional thousands grouping, e.g. `1 234`; lazy so it stops
/// at the first label that follows
const GROUPED_INTEGER: &str = r"\d[\d ,\x{A0}\x{202F}]*?";

/// Capture group name used by the limit pattern for its amount
pub const LIMIT_AMOUNT_GROUP: &str = "amount";

/// Capture group name set when a limit bound opens a range (`;-`)
pub const LIMIT_OPEN_GROUP: &str = "open";

/// Regex source for a field
///
/// `LimitLower` and `LimitUpper` share one source; the extractor tells the
/// bounds apart by the open-range marker.
pub fn pattern_source(field: Field) -> String {
    let order = escape(labels::ORDER_WORD);

    match field {
        // longest prefix before the last ";<count> <order-word>"
        Field::Name => format!(r"^(?P<name>.*);{GROUPED_INTEGER} {order}"),
        Field::Orders => format!(r"(?P<orders>{GROUPED_INTEGER}) {order}"),
        // the decimal segment directly after the order-count segment
        Field::Completed => format!(r"{order}[^;]*;(?P<completed>\d+\.\d{{0,2}})"),
        Field::Price => format!(r";(?P<price>{GROUPED_DECIMAL});"),
        Field::Available => format!(
            r"{};(?P<available>{GROUPED_DECIMAL}) ",
            escape(labels::AVAILABLE)
        ),
        Field::LimitLower | Field::LimitUpper => format!(
            r"{};[^;\d]+;(?P<{LIMIT_AMOUNT_GROUP}>\d[\d ,\x{{A0}}\x{{202F}}]*\.\d{{0,2}})(?P<{LIMIT_OPEN_GROUP}>;-)?",
            escape(labels::LIMIT)
        ),
        Field::WaysToPurchase => format!(
            r"^.*\.\d{{2}};(?P<ways_to_purchase>.*);{}",
            escape(labels::BUY)
        ),
    }
}

/// Compiled pattern set, one regex per distinct source
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub name: Regex,
    pub orders: Regex,
    pub completed: Regex,
    pub price: Regex,
    pub available: Regex,
    pub limit: Regex,
    pub ways_to_purchase: Regex,
}

impl PatternSet {
    /// Compile every field pattern
    pub fn compile() -> Result<Self> {
        Ok(Self {
            name: compile(Field::Name)?,
            orders: compile(Field::Orders)?,
            completed: compile(Field::Completed)?,
            price: compile(Field::Price)?,
            available: compile(Field::Available)?,
            limit: compile(Field::LimitUpper)?,
            ways_to_purchase: compile(Field::WaysToPurchase)?,
        })
    }
}

fn compile(field: Field) -> Result<Regex> {
    Regex::new(&pattern_source(field)).map_err(|e| Error::pattern(field.column_name(), e))
}
