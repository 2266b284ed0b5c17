//! JSON document validation.

use serde_json::Value;
use stillwater::Validation;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::FieldValidator;

/// Validates arbitrary JSON documents.
///
/// Strings are parsed as JSON text; every other value is serialized and
/// parsed back, which proves it round-trips as a JSON document and drops
/// any non-JSON structure on the way.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonValidator;

impl JsonValidator {
    /// Creates a JSON validator.
    pub fn new() -> Self {
        Self
    }

    fn normalize(value: &FieldValue) -> Option<Value> {
        match value {
            FieldValue::Str(s) => serde_json::from_str(s).ok(),
            other => {
                let text = other.to_json().to_string();
                serde_json::from_str(&text).ok()
            }
        }
    }
}

impl FieldValidator for JsonValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        match Self::normalize(&value) {
            Some(doc) => Validation::Success(FieldValue::Json(doc)),
            None => Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid", value),
            )),
        }
    }

    /// Values that fail to normalize pass through unchanged so dumping
    /// never fails.
    fn dump(&self, value: FieldValue) -> FieldValue {
        match Self::normalize(&value) {
            Some(doc) => FieldValue::Json(doc),
            None => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldType;
    use serde_json::{json, Map};

    fn field() -> FieldDescriptor {
        FieldDescriptor::builder("payload", FieldType::Json)
            .build()
            .unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_parses_json_text() {
        let validator = JsonValidator::new();
        let result = validator.validate(
            &field(),
            FieldValue::Str(r#"{"a": [1, 2]}"#.into()),
            &Map::new(),
        );
        assert_eq!(
            result.into_result().unwrap(),
            FieldValue::Json(json!({"a": [1, 2]}))
        );
    }

    #[test]
    fn test_accepts_structured_value() {
        let validator = JsonValidator::new();
        let result = validator.validate(
            &field(),
            FieldValue::Json(json!({"nested": {"ok": true}})),
            &Map::new(),
        );
        assert!(result.is_success());
    }

    #[test]
    fn test_scalar_round_trips() {
        let validator = JsonValidator::new();
        let result = validator.validate(&field(), FieldValue::Int(42), &Map::new());
        assert_eq!(result.into_result().unwrap(), FieldValue::Json(json!(42)));
    }

    #[test]
    fn test_rejects_invalid_json_text() {
        let validator = JsonValidator::new();
        let result = validator.validate(&field(), FieldValue::Str("{not json".into()), &Map::new());
        assert_eq!(unwrap_failure(result).message, "{not json not valid");
    }

    #[test]
    fn test_dump_never_fails() {
        let validator = JsonValidator::new();
        assert_eq!(
            validator.dump(FieldValue::Str(r#"[1, 2]"#.into())),
            FieldValue::Json(json!([1, 2]))
        );
        // unparsable text passes through unchanged
        assert_eq!(
            validator.dump(FieldValue::Str("{broken".into())),
            FieldValue::Str("{broken".into())
        );
    }
}
