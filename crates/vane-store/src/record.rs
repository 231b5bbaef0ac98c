use std::fmt;

use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// Reserved field carrying the logical clock value the record was last
/// stamped with. The store owns this field; a producer-supplied value is
/// overwritten on write.
pub const CLOCK_FIELD: &str = "lamport_clock";

/// An opaque, validated record: a JSON object mapping field names to
/// arbitrary JSON values, plus the store-managed [`CLOCK_FIELD`] stamp.
///
/// Producers submit the payload verbatim; the only structural requirement
/// is that it is a JSON object (not an array, scalar, or bare text).
#[derive(Clone, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Parse and validate a wire payload.
    ///
    /// Returns [`StoreError::InvalidPayload`] if the bytes are not a
    /// well-formed JSON object. Validation never mutates anything, so a
    /// failed parse leaves the caller free to report and move on.
    pub fn parse(payload: &[u8]) -> StoreResult<Self> {
        if payload.is_empty() {
            return Err(StoreError::InvalidPayload("empty payload".to_string()));
        }
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| StoreError::InvalidPayload(e.to_string()))?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(StoreError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Build a record directly from a field mapping.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The record's fields, including the clock stamp if present.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Stamp the record with a logical clock value, replacing any prior
    /// stamp (including one smuggled in by the producer).
    pub fn stamp(&mut self, clock: u64) {
        self.fields.insert(CLOCK_FIELD.to_string(), Value::from(clock));
    }

    /// The logical clock value this record was last stamped with, or zero
    /// if it has never been stamped.
    pub fn stamped_clock(&self) -> u64 {
        self.fields
            .get(CLOCK_FIELD)
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// Canonical wire encoding.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.fields)?)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("fields", &self.fields.len())
            .field("stamped_clock", &self.stamped_clock())
            .finish()
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_valid_object() {
        let record = Record::parse(br#"{"id":"IDS60901","air_temp":13.3}"#).unwrap();
        assert_eq!(record.get("id"), Some(&json!("IDS60901")));
        assert_eq!(record.get("air_temp"), Some(&json!(13.3)));
    }

    #[test]
    fn parse_nested_values() {
        let record =
            Record::parse(br#"{"station":{"lat":-34.9,"lon":138.6},"readings":[1,2,3]}"#).unwrap();
        assert!(record.get("station").unwrap().is_object());
        assert!(record.get("readings").unwrap().is_array());
    }

    #[test]
    fn parse_rejects_bare_text() {
        let err = Record::parse(b"new:data").unwrap_err();
        assert!(matches!(err, StoreError::InvalidPayload(_)));
    }

    #[test]
    fn parse_rejects_non_object_json() {
        for payload in [&b"[1,2,3]"[..], b"42", b"\"text\"", b"null", b"true"] {
            let err = Record::parse(payload).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPayload(_)), "payload: {payload:?}");
        }
    }

    #[test]
    fn parse_rejects_truncated_json() {
        let err = Record::parse(br#"{"id":"IDS6090"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPayload(_)));
    }

    #[test]
    fn parse_rejects_empty_payload() {
        let err = Record::parse(b"").unwrap_err();
        assert!(matches!(err, StoreError::InvalidPayload(_)));
    }

    #[test]
    fn stamp_and_read_back() {
        let mut record = Record::parse(br#"{"id":"x"}"#).unwrap();
        assert_eq!(record.stamped_clock(), 0);
        record.stamp(7);
        assert_eq!(record.stamped_clock(), 7);
        assert_eq!(record.get(CLOCK_FIELD), Some(&json!(7)));
    }

    #[test]
    fn stamp_overwrites_producer_supplied_value() {
        let mut record = Record::parse(br#"{"id":"x","lamport_clock":999}"#).unwrap();
        record.stamp(3);
        assert_eq!(record.stamped_clock(), 3);
    }

    #[test]
    fn round_trip_preserves_fields() {
        let mut record = Record::parse(br#"{"id":"IDS60901","air_temp":13.3}"#).unwrap();
        record.stamp(5);
        let bytes = record.to_bytes().unwrap();
        let back = Record::parse(&bytes).unwrap();
        assert_eq!(back, record);
    }
}
