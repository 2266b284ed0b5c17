//! Validator chaining.

use serde_json::{Map, Value};

use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::{FieldValidator, Validator};

/// Runs validators in sequence, each consuming the previous outcome.
///
/// Validation short-circuits at the first failure. Dumping applies each
/// link's dump in the same order. Schema contribution lets every link
/// write into the same property map, so a later link overrides keywords
/// an earlier link also set.
///
/// # Example
///
/// ```rust
/// use fieldcast::{
///     ChainValidator, FieldDescriptor, FieldType, FieldValue, StrValidator, UuidValidator,
///     Validator,
/// };
/// use serde_json::Map;
///
/// let field = FieldDescriptor::builder("id", FieldType::Str)
///     .build()
///     .unwrap();
/// let validator: Validator = ChainValidator::new()
///     .then(StrValidator::new())
///     .then(UuidValidator::new())
///     .into();
///
/// let outcome = validator.validate(
///     &field,
///     FieldValue::Str("3fa85f64-5717-4562-b3fc-2c963f66afa6".into()),
///     &Map::new(),
/// );
/// assert!(outcome.is_success());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChainValidator {
    validators: Vec<Validator>,
}

impl ChainValidator {
    /// Creates an empty chain; validation of any value succeeds unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validator to the end of the chain.
    pub fn then(mut self, validator: impl Into<Validator>) -> Self {
        self.validators.push(validator.into());
        self
    }

    /// The number of links in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the chain has no links.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl FieldValidator for ChainValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        data: &RawRecord,
    ) -> FieldResult {
        let mut current = value;
        for validator in &self.validators {
            match validator.validate(field, current, data) {
                stillwater::Validation::Success(next) => current = next,
                failure => return failure,
            }
        }
        stillwater::Validation::Success(current)
    }

    fn dump(&self, value: FieldValue) -> FieldValue {
        self.validators
            .iter()
            .fold(value, |current, validator| validator.dump(current))
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        for validator in &self.validators {
            validator.describe_schema(prop);
        }
    }
}
