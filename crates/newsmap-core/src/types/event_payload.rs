//! EventPayload: one event record as produced by the extraction pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::PayloadError;

/// An extracted event. Only `abstract` takes part in id derivation; the other
/// fields ride along for callers that persist the event entity elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_summary: Option<String>,
    /// Participant entities, normalized names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<String>,
    /// Participant entities as they appeared in the source text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities_original: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<String>,
    /// Any other keys the extractor emitted.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventPayload {
    /// A payload carrying only an abstract.
    pub fn with_abstract(text: impl Into<String>) -> Self {
        Self {
            abstract_text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Builder: attach participant entities.
    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = entities.into_iter().map(Into::into).collect();
        self
    }

    /// Convert a dict-shaped event from the extraction pipeline.
    pub fn from_json(value: &Value) -> Result<Self, PayloadError> {
        let object = value.as_object().ok_or(PayloadError::NotAnObject {
            found: json_kind(value),
        })?;

        match object.get("abstract") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => {
                return Err(PayloadError::InvalidField {
                    field: "abstract",
                    message: format!("expected a string, got {}", json_kind(other)),
                })
            }
        }

        serde_json::from_value(value.clone()).map_err(|e| PayloadError::InvalidField {
            field: "payload",
            message: e.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
