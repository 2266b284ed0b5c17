//! String and email validation.
//!
//! [`StrValidator`] enforces the string type plus optional length bounds;
//! [`EmailValidator`] layers mailbox-syntax checking on top of it.

use regex::Regex;
use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::FieldValidator;

/// Mailbox syntax only; deliverability is deliberately not checked.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

/// Validates string values with optional length bounds.
///
/// Length bounds are enforced only when non-zero and count Unicode scalar
/// values, not bytes.
///
/// # Example
///
/// ```rust
/// use fieldcast::{FieldDescriptor, FieldType, FieldValue, StrValidator, Validator};
/// use serde_json::Map;
///
/// let field = FieldDescriptor::builder("name", FieldType::Str)
///     .build()
///     .unwrap();
/// let validator: Validator = StrValidator::new().min_length(3).into();
///
/// let outcome = validator.validate(&field, FieldValue::Str("ab".into()), &Map::new());
/// assert!(outcome.is_failure());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrValidator {
    min_length: usize,
    max_length: usize,
}

impl StrValidator {
    /// Creates a string validator with no length bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length (enforced when non-zero).
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    /// Sets the maximum length (enforced when non-zero).
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }
}

impl FieldValidator for StrValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let s = match value {
            FieldValue::Str(s) => s,
            _ => {
                return Validation::Failure(FieldError::new(field.name(), "Must be a string"));
            }
        };
        let len = s.chars().count();
        if self.min_length > 0 && len < self.min_length {
            return Validation::Failure(FieldError::new(field.name(), "Too short"));
        }
        if self.max_length > 0 && len > self.max_length {
            return Validation::Failure(FieldError::new(field.name(), "Too long"));
        }
        Validation::Success(FieldValue::Str(s))
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        if self.min_length > 0 {
            prop.insert("minLength".to_string(), json!(self.min_length));
        }
        if self.max_length > 0 {
            prop.insert("maxLength".to_string(), json!(self.max_length));
        }
    }
}

/// Validates email addresses.
///
/// Composes [`StrValidator`] first (type and length checks), then checks
/// mailbox syntax. Deliverability is not checked.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    strings: StrValidator,
    pattern: Regex,
}

impl EmailValidator {
    /// Creates an email validator with no length bounds.
    pub fn new() -> Self {
        Self {
            strings: StrValidator::new(),
            pattern: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
        }
    }

    /// Sets the minimum length (enforced when non-zero).
    pub fn min_length(mut self, min: usize) -> Self {
        self.strings = self.strings.min_length(min);
        self
    }

    /// Sets the maximum length (enforced when non-zero).
    pub fn max_length(mut self, max: usize) -> Self {
        self.strings = self.strings.max_length(max);
        self
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator for EmailValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        data: &RawRecord,
    ) -> FieldResult {
        let value = match self.strings.validate(field, value, data) {
            Validation::Success(v) => v,
            failure => return failure,
        };
        match value.as_str() {
            Some(s) if self.pattern.is_match(s) => Validation::Success(value),
            _ => Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not a valid email", value),
            )),
        }
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        self.strings.describe_schema(prop);
    }
}
