//! Row shaping for data fetches

use chrono::{DateTime, SecondsFormat, Utc};
use insights_types::{Event, TIMESTAMP_FIELD};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

/// Leading integer of a string, the way a lenient integer parse reads it
static LEADING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+\-]?[0-9]+)").unwrap());

/// Convert epoch milliseconds to an ISO 8601 string, e.g. `2021-01-01T00:00:00.000Z`
pub fn epoch_millis_to_iso(millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Shape one event for the host
///
/// A truthy timestamp field holding epoch milliseconds (number or numeric
/// string) is replaced by its ISO 8601 form. Every other field is left as is.
pub fn shape_event(mut event: Event) -> Event {
    if let Some(value) = event.get_mut(TIMESTAMP_FIELD) {
        if is_truthy(value) {
            match epoch_millis(value).and_then(epoch_millis_to_iso) {
                Some(iso) => *value = Value::String(iso),
                None => warn!("Leaving unparseable timestamp as is: {}", value),
            }
        }
    }
    event
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => LEADING_INT
            .captures(s)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse().ok()),
        _ => None,
    }
}
