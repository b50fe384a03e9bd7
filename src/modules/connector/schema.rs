//! Column type inference from a sample event

use insights_types::{ColumnDescriptor, ColumnType, Event, TIMESTAMP_FIELD};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

/// Decimal with a fractional part: `1.5`, `-0.25`, `+2.0`, `.5`
static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+\-]?[0-9]*\.[0-9]+$").unwrap());

/// Optionally signed digits: `42`, `-5`, `+7`
static INT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+\-]?[0-9]+$").unwrap());

/// Infer a column type from its name and one sample value
///
/// The timestamp field is always `datetime`. Otherwise the value's text form
/// is checked against the float pattern, then the int pattern, and anything
/// left over is a `string`.
pub fn infer_type(field: &str, value: &Value) -> ColumnType {
    if field == TIMESTAMP_FIELD {
        return ColumnType::Datetime;
    }

    let text = value_text(value);
    if FLOAT_PATTERN.is_match(&text) {
        ColumnType::Float
    } else if INT_PATTERN.is_match(&text) {
        ColumnType::Int
    } else {
        ColumnType::String
    }
}

/// Build one descriptor per field of the sample, in key order
pub fn describe_columns(sample: &Event) -> Vec<ColumnDescriptor> {
    sample
        .iter()
        .map(|(name, value)| {
            let column = ColumnDescriptor::new(name.as_str(), infer_type(name, value));
            if name == TIMESTAMP_FIELD {
                column.with_incremental_refresh()
            } else {
                column
            }
        })
        .collect()
}

// Strings are matched on their content, numbers on their JavaScript text,
// everything else on its JSON text.
fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) if n.is_f64() => {
            Cow::Owned(n.as_f64().map(number_text).unwrap_or_default())
        }
        other => Cow::Owned(other.to_string()),
    }
}

/// Render a float the way JavaScript's `String(number)` does
///
/// Whole values print without a fraction (`3.0` is `"3"`). Magnitudes from
/// 1e21 up, or below 1e-6, use exponent notation, which no pattern matches.
fn number_text(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        "0".to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        format!("{:e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
