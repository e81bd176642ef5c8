//! Codec for the JSON representation of values and datasets.
//!
//! Values are opaque to the store: the codec round-trips any
//! [`serde_json::Value`] without inspecting it. A dataset is a single JSON
//! object keyed by namespace, each namespace an object keyed by entry key:
//!
//! ```text
//! {
//!   "users":    { "john": {"name": "John", "age": 30} },
//!   "sessions": { "a1b2": "2026-08-21T10:00:00Z" }
//! }
//! ```
//!
//! Empty and whitespace-only input decodes as the empty dataset, so a
//! freshly created document file needs no seeding. Anything else that does
//! not parse fails with [`Error::Malformed`].

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Dataset;

/// Encodes a single value as JSON text.
pub fn encode_value(value: &Value) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::Internal(format!("Failed to encode value: {}", e)))
}

/// Decodes a single value from JSON text.
pub fn decode_value(text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| Error::Malformed(format!("Failed to decode value: {}", e)))
}

/// Encodes a full dataset as JSON text.
pub fn encode_dataset(dataset: &Dataset) -> Result<String> {
    serde_json::to_string(dataset)
        .map_err(|e| Error::Internal(format!("Failed to encode dataset: {}", e)))
}

/// Decodes a full dataset from JSON text.
///
/// Empty or whitespace-only input yields an empty dataset rather than an
/// error.
pub fn decode_dataset(text: &str) -> Result<Dataset> {
    if text.trim().is_empty() {
        return Ok(Dataset::new());
    }
    serde_json::from_str(text)
        .map_err(|e| Error::Malformed(format!("Failed to decode dataset: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_round_trip_values_of_every_json_type() {
        // given
        let values = vec![
            json!(null),
            json!(true),
            json!(42),
            json!(3.5),
            json!("plain text"),
            json!([1, "two", null]),
            json!({"nested": {"deep": [1, 2, 3]}, "flag": false}),
        ];

        for value in values {
            // when
            let encoded = encode_value(&value).unwrap();
            let decoded = decode_value(&encoded).unwrap();

            // then
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn should_decode_empty_input_as_empty_dataset() {
        // given/when
        let empty = decode_dataset("").unwrap();
        let whitespace = decode_dataset("  \n\t").unwrap();

        // then
        assert!(empty.is_empty());
        assert!(whitespace.is_empty());
    }

    #[test]
    fn should_fail_with_malformed_on_unparsable_dataset() {
        // given
        let text = "this is not json";

        // when
        let result = decode_dataset(text);

        // then
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn should_fail_with_malformed_on_unparsable_value() {
        // given
        let text = "{truncated";

        // when
        let result = decode_value(text);

        // then
        assert!(matches!(result, Err(Error::Malformed(_))));
    }

    #[test]
    fn should_round_trip_dataset_with_multiple_namespaces() {
        // given
        let mut dataset = Dataset::new();
        dataset
            .entry("users".to_string())
            .or_default()
            .insert("john".to_string(), json!({"name": "John", "age": 30}));
        dataset
            .entry("sessions".to_string())
            .or_default()
            .insert("a1b2".to_string(), json!("2026-08-21T10:00:00Z"));

        // when
        let encoded = encode_dataset(&dataset).unwrap();
        let decoded = decode_dataset(&encoded).unwrap();

        // then
        assert_eq!(decoded, dataset);
    }

    #[test]
    fn should_preserve_namespace_order_when_decoding() {
        // given
        let text = r#"{"zebra": {"k": 1}, "alpha": {"k": 2}}"#;

        // when
        let dataset = decode_dataset(text).unwrap();
        let names: Vec<&String> = dataset.keys().collect();

        // then
        assert_eq!(names, vec!["alpha", "zebra"]);
    }
}
