//! Record schemas: the validation and dump boundary.
//!
//! A [`RecordSchema`] is an ordered set of [`FieldDescriptor`]s describing one
//! record type. [`validate`](RecordSchema::validate) turns a raw JSON object
//! into a typed [`Record`], collecting an error per failing field;
//! [`dump`](RecordSchema::dump) is the reverse direction back to wire-safe
//! JSON; [`properties`](RecordSchema::properties) renders the per-field
//! constraint map used for schema generation.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::error::{ErrorReport, FieldError};
use crate::field::FieldDescriptor;
use crate::value::FieldValue;
use crate::ValidationResult;

/// A raw wire-side record: a JSON object as received.
pub type RawRecord = Map<String, Value>;

/// A validated record: field name to typed internal value, in schema order.
pub type Record = IndexMap<String, FieldValue>;

/// An ordered set of field descriptors for one record type.
///
/// # Example
///
/// ```rust
/// use fieldcast::{FieldDescriptor, FieldType, IntegerValidator, RecordSchema, StrValidator};
/// use serde_json::json;
///
/// let schema = RecordSchema::builder("User")
///     .field(
///         FieldDescriptor::builder("name", FieldType::Str)
///             .required()
///             .validator(StrValidator::new().min_length(1))
///             .build()
///             .unwrap(),
///     )
///     .field(
///         FieldDescriptor::builder("age", FieldType::Int)
///             .validator(IntegerValidator::new().min_value(0))
///             .build()
///             .unwrap(),
///     )
///     .build();
///
/// let raw = json!({"name": "alice", "age": "30"});
/// let record = schema
///     .validate(raw.as_object().unwrap())
///     .into_result()
///     .unwrap();
/// assert_eq!(record.get("age"), Some(&fieldcast::FieldValue::Int(30)));
/// ```
#[derive(Debug)]
pub struct RecordSchema {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
}

impl RecordSchema {
    /// Starts building a schema named `name`.
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder {
        RecordSchemaBuilder {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// The record type's name, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptors in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Looks up a descriptor by field name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// The number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a raw record against every declared field.
    ///
    /// Each present value runs through the field's validator (or is taken as
    /// is when the field has none), then through `post_process` on success.
    /// An absent required field yields a `required` error; an absent optional
    /// field with a default is filled from it. Failures across fields are
    /// collected into one [`ErrorReport`] rather than stopping at the first.
    /// The input map is never mutated.
    pub fn validate(&self, data: &RawRecord) -> ValidationResult<Record> {
        let mut record = Record::new();
        let mut errors = Vec::new();

        for field in self.fields.values() {
            match data.get(field.name()) {
                Some(raw) => {
                    let value = FieldValue::from_json(raw);
                    let outcome = match field.validator() {
                        Some(validator) => validator.validate(field, value, data),
                        None => Validation::Success(value),
                    };
                    match outcome {
                        Validation::Success(value) => {
                            let value = match field.post_process() {
                                Some(post) => post(value),
                                None => value,
                            };
                            record.insert(field.name().to_string(), value);
                        }
                        Validation::Failure(error) => errors.push(error),
                    }
                }
                None => {
                    if let Some(value) = field.default_value().produce() {
                        record.insert(field.name().to_string(), value);
                    } else if field.required() {
                        errors.push(FieldError::new(field.name(), "required"));
                    }
                }
            }
        }

        if errors.is_empty() {
            Validation::Success(record)
        } else {
            Validation::Failure(ErrorReport::from_vec(errors))
        }
    }

    /// Converts a validated record back to a wire-safe JSON object.
    ///
    /// Per field the dump override wins, then the validator's dump, then the
    /// value's own JSON form. Fields not declared by this schema pass through
    /// on their raw JSON form.
    pub fn dump(&self, record: &Record) -> RawRecord {
        let mut out = RawRecord::new();
        for (name, value) in record {
            let json = match self.fields.get(name) {
                Some(field) => match (field.dump_override(), field.validator()) {
                    (Some(dump), _) => dump(value),
                    (None, Some(validator)) => validator.dump(value.clone()).to_json(),
                    (None, None) => value.to_json(),
                },
                None => value.to_json(),
            };
            out.insert(name.clone(), json);
        }
        out
    }

    /// Renders the per-field property map for schema generation.
    ///
    /// Every property carries a `type` keyword from the declared type; the
    /// field's validator contributes its constraint keywords; `format` and
    /// `description` are surfaced when set. A field without a validator gets
    /// only the type and tags.
    pub fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        for field in self.fields.values() {
            let mut prop = Map::new();
            prop.insert(
                "type".to_string(),
                json!(field.declared_type().json_schema_type()),
            );
            if let Some(validator) = field.validator() {
                validator.describe_schema(&mut prop);
            }
            if let Some(format) = field.format() {
                prop.insert("format".to_string(), json!(format));
            }
            if let Some(description) = field.description() {
                prop.insert("description".to_string(), json!(description));
            }
            props.insert(field.name().to_string(), Value::Object(prop));
        }
        props
    }

    /// The names of all required fields, in declaration order.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| f.required())
            .map(|f| f.name())
            .collect()
    }
}

/// Builder for [`RecordSchema`].
pub struct RecordSchemaBuilder {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
}

impl RecordSchemaBuilder {
    /// Adds a field descriptor. A repeated field name replaces the earlier
    /// descriptor but keeps its position.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    /// Builds the schema.
    pub fn build(self) -> RecordSchema {
        RecordSchema {
            name: self.name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{IntegerValidator, StrValidator, UuidValidator};
    use crate::value::FieldType;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn user_schema() -> RecordSchema {
        RecordSchema::builder("User")
            .field(
                FieldDescriptor::builder("name", FieldType::Str)
                    .required()
                    .validator(StrValidator::new().min_length(3))
                    .build()
                    .unwrap(),
            )
            .field(
                FieldDescriptor::builder("age", FieldType::Int)
                    .validator(IntegerValidator::new().min_value(0))
                    .build()
                    .unwrap(),
            )
            .build()
    }

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_validate_coerces_values() {
        let schema = user_schema();
        let record = unwrap_success(schema.validate(&raw(json!({
            "name": "alice",
            "age": "30",
        }))));
        assert_eq!(record.get("name"), Some(&FieldValue::Str("alice".into())));
        assert_eq!(record.get("age"), Some(&FieldValue::Int(30)));
    }

    #[test]
    fn test_validate_collects_errors_across_fields() {
        let schema = user_schema();
        let report = unwrap_failure(schema.validate(&raw(json!({
            "name": "ab",
            "age": -1,
        }))));
        assert_eq!(report.len(), 2);
        assert_eq!(report.messages_for("name"), vec!["Too short"]);
        assert_eq!(report.messages_for("age"), vec!["-1 less than 0"]);
    }

    #[test]
    fn test_missing_required_field() {
        let schema = user_schema();
        let report = unwrap_failure(schema.validate(&raw(json!({}))));
        assert_eq!(report.messages_for("name"), vec!["required"]);
        // optional field absent without default produces no error
        assert!(report.messages_for("age").is_empty());
    }

    #[test]
    fn test_absent_optional_field_stays_absent() {
        let schema = user_schema();
        let record = unwrap_success(schema.validate(&raw(json!({"name": "alice"}))));
        assert!(!record.contains_key("age"));
    }

    #[test]
    fn test_default_fills_absent_field() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("role", FieldType::Str)
                    .default_value(FieldValue::Str("user".into()))
                    .build()
                    .unwrap(),
            )
            .build();
        let record = unwrap_success(schema.validate(&raw(json!({}))));
        assert_eq!(record.get("role"), Some(&FieldValue::Str("user".into())));
    }

    #[test]
    fn test_field_without_validator_passes_through() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("extra", FieldType::Json)
                    .build()
                    .unwrap(),
            )
            .build();
        let record = unwrap_success(schema.validate(&raw(json!({"extra": [1, 2]}))));
        assert_eq!(record.get("extra"), Some(&FieldValue::Json(json!([1, 2]))));
    }

    #[test]
    fn test_post_process_runs_on_success_only() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("name", FieldType::Str)
                    .validator(StrValidator::new().min_length(3))
                    .post_process(|v| match v {
                        FieldValue::Str(s) => FieldValue::Str(s.to_uppercase()),
                        other => other,
                    })
                    .build()
                    .unwrap(),
            )
            .build();

        let record = unwrap_success(schema.validate(&raw(json!({"name": "alice"}))));
        assert_eq!(record.get("name"), Some(&FieldValue::Str("ALICE".into())));

        let report = unwrap_failure(schema.validate(&raw(json!({"name": "ab"}))));
        assert_eq!(report.messages_for("name"), vec!["Too short"]);
    }

    #[test]
    fn test_dump_uses_validator() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("id", FieldType::Str)
                    .validator(UuidValidator::new())
                    .build()
                    .unwrap(),
            )
            .build();
        let mut record = Record::new();
        let u = uuid::Uuid::parse_str("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
        record.insert("id".to_string(), FieldValue::Uuid(u));
        let out = schema.dump(&record);
        assert_eq!(out.get("id"), Some(&json!("3fa85f6457174562b3fc2c963f66afa6")));
    }

    #[test]
    fn test_dump_override_wins() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("id", FieldType::Str)
                    .validator(UuidValidator::new())
                    .dump(|_| json!("redacted"))
                    .build()
                    .unwrap(),
            )
            .build();
        let mut record = Record::new();
        record.insert("id".to_string(), FieldValue::Str("abc".into()));
        let out = schema.dump(&record);
        assert_eq!(out.get("id"), Some(&json!("redacted")));
    }

    #[test]
    fn test_dump_undeclared_field_passes_through() {
        let schema = RecordSchema::builder("T").build();
        let mut record = Record::new();
        record.insert("x".to_string(), FieldValue::Int(1));
        let out = schema.dump(&record);
        assert_eq!(out.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_properties_type_and_constraints() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("name", FieldType::Str)
                    .validator(StrValidator::new().min_length(3).max_length(32))
                    .description("login name")
                    .build()
                    .unwrap(),
            )
            .field(
                FieldDescriptor::builder("id", FieldType::Str)
                    .validator(UuidValidator::new())
                    .format("uuid")
                    .build()
                    .unwrap(),
            )
            .build();
        let props = schema.properties();

        let name = props.get("name").unwrap().as_object().unwrap();
        assert_eq!(name.get("type"), Some(&json!("string")));
        assert_eq!(name.get("minLength"), Some(&json!(3)));
        assert_eq!(name.get("maxLength"), Some(&json!(32)));
        assert_eq!(name.get("description"), Some(&json!("login name")));

        let id = props.get("id").unwrap().as_object().unwrap();
        assert_eq!(id.get("format"), Some(&json!("uuid")));
    }

    #[test]
    fn test_properties_without_validator_has_type_only() {
        let schema = RecordSchema::builder("T")
            .field(
                FieldDescriptor::builder("n", FieldType::Int)
                    .build()
                    .unwrap(),
            )
            .build();
        let props = schema.properties();
        let n = props.get("n").unwrap().as_object().unwrap();
        assert_eq!(n.len(), 1);
        assert_eq!(n.get("type"), Some(&json!("integer")));
    }

    #[test]
    fn test_required_fields_in_order() {
        let schema = user_schema();
        assert_eq!(schema.required_fields(), vec!["name"]);
    }
}
