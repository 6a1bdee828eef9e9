// Payload shape detection.
//
// A payload is classified exactly once into a tagged union so the mapping
// code never has to probe for optional fields itself.

use serde_json::Value;

use crate::error::ShapeError;

// ---------------------------------------------------------------------------
// RawPayload
// ---------------------------------------------------------------------------

/// Untrusted JSON as received from the stats API (or the bundled sample).
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload(pub Value);

impl RawPayload {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(RawPayload)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        RawPayload(value)
    }
}

// ---------------------------------------------------------------------------
// PayloadShape
// ---------------------------------------------------------------------------

/// The recognized payload layouts.
#[derive(Debug, PartialEq)]
pub enum PayloadShape<'a> {
    /// Stats API layout: `{"stats": [{"splits": [...]}, ...]}` or a bare
    /// `{"splits": [...]}`. Splits from every stat group are concatenated.
    Api(Vec<&'a Value>),
    /// Flat layout: `{"players": [...]}` or a top-level array of players.
    Fallback(Vec<&'a Value>),
    Unrecognized,
}

impl<'a> PayloadShape<'a> {
    /// Classify a payload. A non-empty row list in which no row is an object
    /// carries no players at all and is unrecognized.
    pub fn detect(payload: &'a RawPayload) -> Self {
        let value = payload.as_value();

        let shape = if let Some(groups) = value.get("stats").and_then(Value::as_array) {
            let mut splits = Vec::new();
            for group in groups {
                match group.get("splits").and_then(Value::as_array) {
                    Some(rows) => splits.extend(rows.iter()),
                    None => return PayloadShape::Unrecognized,
                }
            }
            PayloadShape::Api(splits)
        } else if let Some(rows) = value.get("splits").and_then(Value::as_array) {
            PayloadShape::Api(rows.iter().collect())
        } else if let Some(rows) = value.get("players").and_then(Value::as_array) {
            PayloadShape::Fallback(rows.iter().collect())
        } else if let Some(rows) = value.as_array() {
            PayloadShape::Fallback(rows.iter().collect())
        } else {
            return PayloadShape::Unrecognized;
        };

        let no_players = match &shape {
            PayloadShape::Api(rows) | PayloadShape::Fallback(rows) => {
                !rows.is_empty() && !rows.iter().any(|row| row.is_object())
            }
            PayloadShape::Unrecognized => false,
        };
        if no_players {
            PayloadShape::Unrecognized
        } else {
            shape
        }
    }

    /// Number of rows, or `None` for an unrecognized payload.
    pub fn row_count(&self) -> Option<usize> {
        match self {
            PayloadShape::Api(rows) | PayloadShape::Fallback(rows) => Some(rows.len()),
            PayloadShape::Unrecognized => None,
        }
    }
}

/// Build a [`ShapeError`] describing what the payload actually was.
pub fn describe_unrecognized(payload: &RawPayload) -> ShapeError {
    let received = match payload.as_value() {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).take(8).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
    };
    ShapeError { received }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
