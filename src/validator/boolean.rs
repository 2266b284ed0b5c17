//! Boolean validation.

use stillwater::Validation;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::FieldValidator;

/// Validates boolean values by textual comparison.
///
/// The incoming value is rendered to text and lowercased, so `true`,
/// `"True"` and `"TRUE"` all coerce to the boolean `true`. Anything whose
/// lowercased text is not exactly `true` or `false` is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolValidator;

impl BoolValidator {
    /// Creates a boolean validator.
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator for BoolValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let text = value.to_string().to_lowercase();
        match text.as_str() {
            "true" => Validation::Success(FieldValue::Bool(true)),
            "false" => Validation::Success(FieldValue::Bool(false)),
            _ => Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid", text),
            )),
        }
    }

    /// Same textual comparison as `validate`, emitting the boolean.
    fn dump(&self, value: FieldValue) -> FieldValue {
        let text = value.to_string().to_lowercase();
        FieldValue::Bool(text == "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldType;
    use serde_json::Map;

    fn field() -> FieldDescriptor {
        FieldDescriptor::builder("active", FieldType::Bool)
            .build()
            .unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_bool_value() {
        let validator = BoolValidator::new();
        let result = validator.validate(&field(), FieldValue::Bool(true), &Map::new());
        assert_eq!(result.into_result().unwrap(), FieldValue::Bool(true));
    }

    #[test]
    fn test_accepts_case_insensitive_strings() {
        let validator = BoolValidator::new();
        for s in ["true", "True", "TRUE"] {
            let result = validator.validate(&field(), FieldValue::Str(s.into()), &Map::new());
            assert_eq!(result.into_result().unwrap(), FieldValue::Bool(true));
        }
        let result = validator.validate(&field(), FieldValue::Str("False".into()), &Map::new());
        assert_eq!(result.into_result().unwrap(), FieldValue::Bool(false));
    }

    #[test]
    fn test_rejects_other_text() {
        let validator = BoolValidator::new();
        let result = validator.validate(&field(), FieldValue::Str("Yes".into()), &Map::new());
        // failure message carries the lowercased text
        assert_eq!(unwrap_failure(result).message, "yes not valid");
    }

    #[test]
    fn test_rejects_number() {
        let validator = BoolValidator::new();
        let result = validator.validate(&field(), FieldValue::Int(1), &Map::new());
        assert_eq!(unwrap_failure(result).message, "1 not valid");
    }

    #[test]
    fn test_dump_textual_comparison() {
        let validator = BoolValidator::new();
        assert_eq!(validator.dump(FieldValue::Bool(true)), FieldValue::Bool(true));
        assert_eq!(
            validator.dump(FieldValue::Str("True".into())),
            FieldValue::Bool(true)
        );
        assert_eq!(
            validator.dump(FieldValue::Str("anything".into())),
            FieldValue::Bool(false)
        );
    }
}
