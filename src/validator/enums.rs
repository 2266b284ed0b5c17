//! Enumeration and choice validation.
//!
//! [`EnumValidator`] checks membership in a declared [`EnumType`] and coerces
//! between member and name forms; [`ChoiceValidator`] checks membership in a
//! fixed set of allowed values.

use std::sync::Arc;

use stillwater::Validation;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::{EnumMember, EnumType, FieldType, FieldValue};
use crate::FieldResult;

use super::FieldValidator;

/// Validates membership in an enum type, to and from member name.
///
/// Accepts either a member of the configured enum type or a string exactly
/// matching a declared member name. The output depends on the field's
/// declared type: when the field is declared as the same enum type the
/// outcome is the member itself, otherwise it is the member's name. This
/// lets one validator serve both typed enum fields and plain string fields
/// constrained to enum values.
///
/// # Example
///
/// ```rust
/// use fieldcast::{EnumType, EnumValidator, FieldDescriptor, FieldType, FieldValue, Validator};
/// use serde_json::Map;
///
/// let color = EnumType::new("Color", ["RED", "GREEN", "BLUE"]);
///
/// // Field declared as the enum type: outcome is the member.
/// let typed = FieldDescriptor::builder("color", FieldType::Enum(color.clone()))
///     .build()
///     .unwrap();
/// let validator: Validator = EnumValidator::new(color.clone()).into();
/// let outcome = validator
///     .validate(&typed, FieldValue::Str("RED".into()), &Map::new())
///     .into_result()
///     .unwrap();
/// assert!(matches!(outcome, FieldValue::Enum(m) if m.name() == "RED"));
///
/// // Field declared as a plain string: outcome is the name.
/// let plain = FieldDescriptor::builder("color", FieldType::Str)
///     .build()
///     .unwrap();
/// let outcome = validator
///     .validate(&plain, FieldValue::Str("RED".into()), &Map::new())
///     .into_result()
///     .unwrap();
/// assert_eq!(outcome, FieldValue::Str("RED".into()));
/// ```
#[derive(Debug, Clone)]
pub struct EnumValidator {
    ty: Arc<EnumType>,
}

impl EnumValidator {
    /// Creates a validator for the given enum type.
    pub fn new(ty: Arc<EnumType>) -> Self {
        Self { ty }
    }

    /// The enum type this validator checks against.
    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }
}

impl FieldValidator for EnumValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let name = match &value {
            FieldValue::Enum(m) if m.enum_type() == &self.ty => m.name().to_string(),
            FieldValue::Str(s) if self.ty.contains(s) => s.clone(),
            other => {
                return Validation::Failure(FieldError::new(
                    field.name(),
                    format!("{} not valid", other),
                ));
            }
        };
        if let FieldType::Enum(declared) = field.declared_type() {
            if declared == &self.ty {
                if let Some(member) = EnumMember::new(self.ty.clone(), name.as_str()) {
                    return Validation::Success(FieldValue::Enum(member));
                }
            }
        }
        Validation::Success(FieldValue::Str(name))
    }

    /// Members dump to their name; anything else passes through.
    fn dump(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Enum(m) => FieldValue::Str(m.name().to_string()),
            other => other,
        }
    }
}

/// Validates membership in a fixed set of allowed values.
#[derive(Debug, Clone)]
pub struct ChoiceValidator {
    choices: Vec<FieldValue>,
}

impl ChoiceValidator {
    /// Creates a validator accepting exactly the given values.
    pub fn new<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = FieldValue>,
    {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    /// Convenience constructor for a set of allowed strings.
    pub fn strings<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(choices.into_iter().map(|s| FieldValue::Str(s.into())))
    }
}

impl FieldValidator for ChoiceValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        if self.choices.contains(&value) {
            Validation::Success(value)
        } else {
            Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid", value),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn color() -> Arc<EnumType> {
        EnumType::new("Color", ["RED", "GREEN", "BLUE"])
    }

    #[test]
    fn test_enum_typed_field_yields_member() {
        let ty = color();
        let field = FieldDescriptor::builder("color", FieldType::Enum(ty.clone()))
            .build()
            .unwrap();
        let validator = EnumValidator::new(ty);
        let outcome = validator
            .validate(&field, FieldValue::Str("RED".into()), &Map::new())
            .into_result()
            .unwrap();
        assert!(matches!(outcome, FieldValue::Enum(m) if m.name() == "RED"));
    }

    #[test]
    fn test_enum_string_field_yields_name() {
        let field = FieldDescriptor::builder("color", FieldType::Str)
            .build()
            .unwrap();
        let validator = EnumValidator::new(color());
        let outcome = validator
            .validate(&field, FieldValue::Str("RED".into()), &Map::new())
            .into_result()
            .unwrap();
        assert_eq!(outcome, FieldValue::Str("RED".into()));
    }

    #[test]
    fn test_enum_accepts_member_value() {
        let ty = color();
        let field = FieldDescriptor::builder("color", FieldType::Enum(ty.clone()))
            .build()
            .unwrap();
        let member = EnumMember::new(ty.clone(), "GREEN").unwrap();
        let validator = EnumValidator::new(ty);
        let outcome = validator
            .validate(&field, FieldValue::Enum(member), &Map::new())
            .into_result()
            .unwrap();
        assert!(matches!(outcome, FieldValue::Enum(m) if m.name() == "GREEN"));
    }

    #[test]
    fn test_enum_name_matching_is_case_sensitive() {
        let field = FieldDescriptor::builder("color", FieldType::Str)
            .build()
            .unwrap();
        let validator = EnumValidator::new(color());
        let result = validator.validate(&field, FieldValue::Str("red".into()), &Map::new());
        assert_eq!(unwrap_failure(result).message, "red not valid");
    }

    #[test]
    fn test_enum_rejects_other_input() {
        let field = FieldDescriptor::builder("color", FieldType::Str)
            .build()
            .unwrap();
        let validator = EnumValidator::new(color());
        let result = validator.validate(&field, FieldValue::Int(1), &Map::new());
        assert_eq!(unwrap_failure(result).message, "1 not valid");
    }

    #[test]
    fn test_enum_dump_member_to_name() {
        let ty = color();
        let validator = EnumValidator::new(ty.clone());
        let member = EnumMember::new(ty, "BLUE").unwrap();
        assert_eq!(
            validator.dump(FieldValue::Enum(member)),
            FieldValue::Str("BLUE".into())
        );
        assert_eq!(
            validator.dump(FieldValue::Str("BLUE".into())),
            FieldValue::Str("BLUE".into())
        );
    }

    #[test]
    fn test_choice_accepts_member_of_set() {
        let field = FieldDescriptor::builder("kind", FieldType::Str)
            .build()
            .unwrap();
        let validator = ChoiceValidator::strings(["abc", "xyz"]);
        let result = validator.validate(&field, FieldValue::Str("abc".into()), &Map::new());
        assert!(result.is_success());
    }

    #[test]
    fn test_choice_rejects_naming_value() {
        let field = FieldDescriptor::builder("kind", FieldType::Str)
            .build()
            .unwrap();
        let validator = ChoiceValidator::strings(["abc", "xyz"]);
        let result = validator.validate(&field, FieldValue::Str("nope".into()), &Map::new());
        assert_eq!(unwrap_failure(result).message, "nope not valid");
    }

    #[test]
    fn test_choice_non_string_values() {
        let field = FieldDescriptor::builder("level", FieldType::Int)
            .build()
            .unwrap();
        let validator = ChoiceValidator::new([FieldValue::Int(1), FieldValue::Int(2)]);
        assert!(validator
            .validate(&field, FieldValue::Int(2), &Map::new())
            .is_success());
        assert!(validator
            .validate(&field, FieldValue::Int(3), &Map::new())
            .is_failure());
    }
}
