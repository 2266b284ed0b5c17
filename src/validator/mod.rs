//! Validator variants.
//!
//! This module provides the [`FieldValidator`] capability and the closed set
//! of concrete validator variants, dispatched statically through the
//! [`Validator`] enum. Every variant is immutable after construction, so a
//! single validator instance is safe to share across threads for any number
//! of concurrent validate/dump calls.
//!
//! # Example
//!
//! ```rust
//! use fieldcast::{FieldDescriptor, FieldType, FieldValue, StrValidator, Validator};
//! use serde_json::Map;
//! use stillwater::Validation;
//!
//! let field = FieldDescriptor::builder("name", FieldType::Str)
//!     .build()
//!     .unwrap();
//! let validator: Validator = StrValidator::new().min_length(3).into();
//!
//! let outcome = validator.validate(&field, FieldValue::Str("abc".into()), &Map::new());
//! assert!(outcome.is_success());
//!
//! let outcome = validator.validate(&field, FieldValue::Str("ab".into()), &Map::new());
//! assert!(outcome.is_failure());
//! ```

mod boolean;
mod chain;
mod enums;
mod json;
mod numeric;
mod string;
mod temporal;
mod uuid;

pub use boolean::BoolValidator;
pub use chain::ChainValidator;
pub use enums::{ChoiceValidator, EnumValidator};
pub use json::JsonValidator;
pub use numeric::{Bounds, DecimalValidator, IntegerValidator, NumberValidator, SchemaNumber};
pub use string::{EmailValidator, StrValidator};
pub use temporal::{DateTimeValidator, DateValidator};
pub use self::uuid::UuidValidator;

use serde_json::Map;
use serde_json::Value;

use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

/// The validator capability.
///
/// `validate` coerces a raw value into the internal typed value or fails with
/// a field-scoped error; `dump` is the reverse conversion to an
/// externally-safe value and must not fail for validator-approved values
/// (defaulting to identity); `describe_schema` contributes constraint
/// keywords into a property schema (defaulting to a no-op).
///
/// `data` is the full raw record for cross-field checks and is read-only.
pub trait FieldValidator: Send + Sync {
    /// Validates a raw value, producing the coerced internal value.
    fn validate(&self, field: &FieldDescriptor, value: FieldValue, data: &RawRecord)
        -> FieldResult;

    /// Converts a validated internal value back to an external representation.
    fn dump(&self, value: FieldValue) -> FieldValue {
        value
    }

    /// Adds constraint keywords describing this validator's restrictions.
    fn describe_schema(&self, _prop: &mut Map<String, Value>) {}
}

/// The closed set of validator variants.
///
/// Each case wraps a concrete validator; dispatch is a static match rather
/// than runtime capability probing. `From` impls let builders accept the
/// variant structs directly.
#[derive(Debug, Clone)]
pub enum Validator {
    Str(StrValidator),
    Email(EmailValidator),
    Uuid(UuidValidator),
    Enum(EnumValidator),
    Choice(ChoiceValidator),
    Date(DateValidator),
    DateTime(DateTimeValidator),
    Number(NumberValidator),
    Integer(IntegerValidator),
    Decimal(DecimalValidator),
    Bool(BoolValidator),
    Json(JsonValidator),
    Chain(ChainValidator),
}

impl Validator {
    /// Validates a raw value against this validator.
    pub fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        data: &RawRecord,
    ) -> FieldResult {
        match self {
            Validator::Str(v) => v.validate(field, value, data),
            Validator::Email(v) => v.validate(field, value, data),
            Validator::Uuid(v) => v.validate(field, value, data),
            Validator::Enum(v) => v.validate(field, value, data),
            Validator::Choice(v) => v.validate(field, value, data),
            Validator::Date(v) => v.validate(field, value, data),
            Validator::DateTime(v) => v.validate(field, value, data),
            Validator::Number(v) => v.validate(field, value, data),
            Validator::Integer(v) => v.validate(field, value, data),
            Validator::Decimal(v) => v.validate(field, value, data),
            Validator::Bool(v) => v.validate(field, value, data),
            Validator::Json(v) => v.validate(field, value, data),
            Validator::Chain(v) => v.validate(field, value, data),
        }
    }

    /// Converts an internal value back to an external representation.
    pub fn dump(&self, value: FieldValue) -> FieldValue {
        match self {
            Validator::Str(v) => v.dump(value),
            Validator::Email(v) => v.dump(value),
            Validator::Uuid(v) => v.dump(value),
            Validator::Enum(v) => v.dump(value),
            Validator::Choice(v) => v.dump(value),
            Validator::Date(v) => v.dump(value),
            Validator::DateTime(v) => v.dump(value),
            Validator::Number(v) => v.dump(value),
            Validator::Integer(v) => v.dump(value),
            Validator::Decimal(v) => v.dump(value),
            Validator::Bool(v) => v.dump(value),
            Validator::Json(v) => v.dump(value),
            Validator::Chain(v) => v.dump(value),
        }
    }

    /// Adds this validator's constraint keywords to a property schema.
    pub fn describe_schema(&self, prop: &mut Map<String, Value>) {
        match self {
            Validator::Str(v) => v.describe_schema(prop),
            Validator::Email(v) => v.describe_schema(prop),
            Validator::Uuid(v) => v.describe_schema(prop),
            Validator::Enum(v) => v.describe_schema(prop),
            Validator::Choice(v) => v.describe_schema(prop),
            Validator::Date(v) => v.describe_schema(prop),
            Validator::DateTime(v) => v.describe_schema(prop),
            Validator::Number(v) => v.describe_schema(prop),
            Validator::Integer(v) => v.describe_schema(prop),
            Validator::Decimal(v) => v.describe_schema(prop),
            Validator::Bool(v) => v.describe_schema(prop),
            Validator::Json(v) => v.describe_schema(prop),
            Validator::Chain(v) => v.describe_schema(prop),
        }
    }
}

impl From<StrValidator> for Validator {
    fn from(v: StrValidator) -> Self {
        Validator::Str(v)
    }
}

impl From<EmailValidator> for Validator {
    fn from(v: EmailValidator) -> Self {
        Validator::Email(v)
    }
}

impl From<UuidValidator> for Validator {
    fn from(v: UuidValidator) -> Self {
        Validator::Uuid(v)
    }
}

impl From<EnumValidator> for Validator {
    fn from(v: EnumValidator) -> Self {
        Validator::Enum(v)
    }
}

impl From<ChoiceValidator> for Validator {
    fn from(v: ChoiceValidator) -> Self {
        Validator::Choice(v)
    }
}

impl From<DateValidator> for Validator {
    fn from(v: DateValidator) -> Self {
        Validator::Date(v)
    }
}

impl From<DateTimeValidator> for Validator {
    fn from(v: DateTimeValidator) -> Self {
        Validator::DateTime(v)
    }
}

impl From<NumberValidator> for Validator {
    fn from(v: NumberValidator) -> Self {
        Validator::Number(v)
    }
}

impl From<IntegerValidator> for Validator {
    fn from(v: IntegerValidator) -> Self {
        Validator::Integer(v)
    }
}

impl From<DecimalValidator> for Validator {
    fn from(v: DecimalValidator) -> Self {
        Validator::Decimal(v)
    }
}

impl From<BoolValidator> for Validator {
    fn from(v: BoolValidator) -> Self {
        Validator::Bool(v)
    }
}

impl From<JsonValidator> for Validator {
    fn from(v: JsonValidator) -> Self {
        Validator::Json(v)
    }
}

impl From<ChainValidator> for Validator {
    fn from(v: ChainValidator) -> Self {
        Validator::Chain(v)
    }
}

// A validator instance is shared read-only across threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};
