//! UUID validation.

use stillwater::Validation;
use uuid::Uuid;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::FieldValidator;

/// Validates UUID values.
///
/// Accepts a `Uuid` value or any string `uuid::Uuid` can parse (hyphenated,
/// simple, braced or URN form). The coerced internal value is always the
/// 32-character lowercase hex digest, so downstream code sees exactly one
/// canonical string form regardless of how the value arrived.
///
/// # Example
///
/// ```rust
/// use fieldcast::{FieldDescriptor, FieldType, FieldValue, UuidValidator, Validator};
/// use serde_json::Map;
///
/// let field = FieldDescriptor::builder("id", FieldType::Str)
///     .format("uuid")
///     .build()
///     .unwrap();
/// let validator: Validator = UuidValidator::new().into();
///
/// let outcome = validator.validate(
///     &field,
///     FieldValue::Str("3fa85f64-5717-4562-b3fc-2c963f66afa6".into()),
///     &Map::new(),
/// );
/// assert_eq!(
///     outcome.into_result().unwrap(),
///     FieldValue::Str("3fa85f6457174562b3fc2c963f66afa6".into()),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidValidator;

impl UuidValidator {
    /// Creates a UUID validator.
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator for UuidValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        match value {
            FieldValue::Uuid(u) => Validation::Success(FieldValue::Str(u.simple().to_string())),
            FieldValue::Str(s) => match Uuid::parse_str(&s) {
                Ok(u) => Validation::Success(FieldValue::Str(u.simple().to_string())),
                Err(_) => Validation::Failure(FieldError::new(
                    field.name(),
                    format!("{} not a valid uuid", s),
                )),
            },
            other => Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not a valid uuid", other),
            )),
        }
    }

    /// `Uuid` values become their hex digest; anything else passes through,
    /// so dumping an already-dumped value is a no-op.
    fn dump(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Uuid(u) => FieldValue::Str(u.simple().to_string()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldType;
    use serde_json::Map;

    fn field() -> FieldDescriptor {
        FieldDescriptor::builder("id", FieldType::Str)
            .build()
            .unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_hyphenated_string_normalized_to_hex() {
        let validator = UuidValidator::new();
        let result = validator.validate(
            &field(),
            FieldValue::Str("3fa85f64-5717-4562-b3fc-2c963f66afa6".into()),
            &Map::new(),
        );
        assert_eq!(
            result.into_result().unwrap(),
            FieldValue::Str("3fa85f6457174562b3fc2c963f66afa6".into())
        );
    }

    #[test]
    fn test_uuid_value_normalized_to_hex() {
        let validator = UuidValidator::new();
        let u = Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
        let result = validator.validate(&field(), FieldValue::Uuid(u), &Map::new());
        assert_eq!(
            result.into_result().unwrap(),
            FieldValue::Str("3fa85f6457174562b3fc2c963f66afa6".into())
        );
    }

    #[test]
    fn test_unparsable_string_fails_naming_value() {
        let validator = UuidValidator::new();
        let result = validator.validate(&field(), FieldValue::Str("not-a-uuid".into()), &Map::new());
        assert_eq!(unwrap_failure(result).message, "not-a-uuid not a valid uuid");
    }

    #[test]
    fn test_non_string_fails() {
        let validator = UuidValidator::new();
        let result = validator.validate(&field(), FieldValue::Int(42), &Map::new());
        assert_eq!(unwrap_failure(result).message, "42 not a valid uuid");
    }

    #[test]
    fn test_dump_idempotent() {
        let validator = UuidValidator::new();
        let u = Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
        let once = validator.dump(FieldValue::Uuid(u));
        let twice = validator.dump(once.clone());
        assert_eq!(once, twice);
        assert_eq!(
            twice,
            FieldValue::Str("3fa85f6457174562b3fc2c963f66afa6".into())
        );
    }
}
