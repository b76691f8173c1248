//! The schema-less record that flows through the progress feed.

use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub(crate) const PROGRESS_KEY: &str = "progress";

/// A JSON object carrying a `progress` field plus arbitrary caller-supplied
/// metadata. Callers can attach any keys they like; everything except
/// `progress` round-trips untouched, so the model is a dynamic JSON map
/// rather than a fixed struct.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub(crate) struct ProgressRecord(Map<String, Value>);

impl ProgressRecord {
    /// Parses the full stdin payload. Anything other than a single JSON
    /// object is malformed input and fatal.
    pub(crate) fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| eyre!("malformed input: not a valid JSON document: {}", e))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(eyre!(
                "malformed input: expected a JSON object, got {}",
                json_type_name(&other)
            )),
        }
    }

    /// Overwrites `progress` with a percentage. Whatever type the caller
    /// supplied under that key is replaced on the first update.
    pub(crate) fn set_progress(&mut self, percent: u64) {
        self.0.insert(PROGRESS_KEY.to_string(), Value::from(percent));
    }

    pub(crate) fn progress(&self) -> Option<&Value> {
        self.0.get(PROGRESS_KEY)
    }

    /// Compact serialization, no trailing newline: successive documents on
    /// the wire abut each other and the consumer frames them itself.
    pub(crate) fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
