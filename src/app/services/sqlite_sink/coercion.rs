//! Raw-text to column-value coercion
//!
//! Extracted values are sub-strings of the export and may carry thousands
//! separators; the destination columns are typed.

use rusqlite::types::Value;

use crate::app::models::{ColumnKind, Field};
use crate::constants::THOUSANDS_SEPARATORS;

/// How a raw field value was converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Field was not extracted, bound as NULL
    Absent,
    /// Value converted to the column type
    Converted,
    /// Value present but not convertible, bound as NULL
    Failed,
}

/// Strip grouping separators and a trailing percent sign from a number
pub fn normalize_number(raw: &str) -> String {
    raw.trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
        .collect()
}

/// Convert one raw value to the SQLite value for its field's column
pub fn coerce(field: Field, raw: Option<&str>) -> (Value, Coercion) {
    let Some(raw) = raw else {
        return (Value::Null, Coercion::Absent);
    };

    let converted = match field.column_kind() {
        ColumnKind::Text => Some(Value::Text(raw.to_string())),
        ColumnKind::Integer => normalize_number(raw).parse::<i64>().ok().map(Value::Integer),
        ColumnKind::Real => normalize_number(raw)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Real),
    };

    match converted {
        Some(value) => (value, Coercion::Converted),
        None => (Value::Null, Coercion::Failed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_number() {
        assert_eq!(normalize_number("1 250.75"), "1250.75");
        assert_eq!(normalize_number("115,590.00"), "115590.00");
        assert_eq!(normalize_number("12\u{a0}000.5"), "12000.5");
        assert_eq!(normalize_number("9\u{202f}999.99"), "9999.99");
        assert_eq!(normalize_number(" 97.30% "), "97.30");
    }

    #[test]
    fn test_coerce_real_fields() {
        assert_eq!(
            coerce(Field::Available, Some("1 250.75")),
            (Value::Real(1250.75), Coercion::Converted)
        );
        assert_eq!(
            coerce(Field::Completed, Some("97.")),
            (Value::Real(97.0), Coercion::Converted)
        );
    }

    #[test]
    fn test_coerce_integer_field() {
        assert_eq!(
            coerce(Field::Orders, Some("148")),
            (Value::Integer(148), Coercion::Converted)
        );
        assert_eq!(
            coerce(Field::Orders, Some("14.8")),
            (Value::Null, Coercion::Failed)
        );
    }

    #[test]
    fn test_coerce_text_is_verbatim() {
        let raw = "Тинькофф; 'СБП'";
        assert_eq!(
            coerce(Field::WaysToPurchase, Some(raw)),
            (Value::Text(raw.to_string()), Coercion::Converted)
        );
    }

    #[test]
    fn test_coerce_absent_and_unparseable() {
        assert_eq!(coerce(Field::Price, None), (Value::Null, Coercion::Absent));
        assert_eq!(
            coerce(Field::Price, Some("n/a")),
            (Value::Null, Coercion::Failed)
        );
        assert_eq!(
            coerce(Field::Price, Some("inf")),
            (Value::Null, Coercion::Failed)
        );
    }
}
