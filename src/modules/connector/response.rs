//! Parse-and-validate step for Insights query responses

use insights_core::InsightsError;
use insights_types::Event;
use serde_json::Value;

/// A response carrying a flat event list in `results[0].events`
///
/// Aggregated or grouped queries return other shapes and never produce one
/// of these.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsResponse {
    pub events: Vec<Event>,
}

impl InsightsResponse {
    /// Parse a response body
    ///
    /// Malformed JSON is [`InsightsError::Json`]; well-formed JSON with the
    /// wrong shape is [`InsightsError::InvalidResponseShape`].
    pub fn parse(body: &str) -> Result<Self, InsightsError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Validate an already decoded response
    pub fn from_value(value: Value) -> Result<Self, InsightsError> {
        let Value::Object(mut root) = value else {
            return Err(shape("response is not an object"));
        };
        let Some(Value::Array(results)) = root.remove("results") else {
            return Err(shape("response has no results list"));
        };
        let Some(Value::Object(mut first)) = results.into_iter().next() else {
            return Err(shape("results list is empty"));
        };
        let Some(Value::Array(events)) = first.remove("events") else {
            return Err(shape("first result has no events list"));
        };

        let events = events
            .into_iter()
            .map(|event| match event {
                Value::Object(fields) => Ok(fields),
                _ => Err(shape("event is not an object")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { events })
    }

    /// First event, used as the schema sample
    pub fn sample(&self) -> Option<&Event> {
        self.events.first()
    }

    /// Consume the response, yielding its events in order
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

fn shape(reason: &str) -> InsightsError {
    InsightsError::InvalidResponseShape(reason.to_string())
}
