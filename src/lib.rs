//! # Fieldcast
//!
//! A typed field validation and serialization engine: record schemas built
//! from field descriptors with pluggable validators that coerce raw JSON
//! values into typed internal values, convert them back for the wire, and
//! contribute constraint keywords to generated JSON Schemas.
//!
//! ## Overview
//!
//! Validation of a record collects an error for every failing field rather
//! than short-circuiting at the first, through integration with stillwater's
//! `Validation` type. Within one field, validators run fail-fast and coerce
//! as they go: `"30"` through an integer validator becomes the integer `30`.
//!
//! ## Core Types
//!
//! - [`FieldValue`]: The typed value algebra validators consume and produce
//! - [`Validator`]: The closed set of validator variants, statically dispatched
//! - [`FieldDescriptor`]: Immutable per-field metadata (type, requiredness, default, validator)
//! - [`RecordSchema`]: An ordered set of descriptors; the validate/dump boundary
//! - [`SchemaRegistry`]: Thread-safe storage of schemas by name
//!
//! ## Example
//!
//! ```rust
//! use fieldcast::{
//!     FieldDescriptor, FieldType, FieldValue, IntegerValidator, RecordSchema, StrValidator,
//! };
//! use serde_json::json;
//!
//! let schema = RecordSchema::builder("User")
//!     .field(
//!         FieldDescriptor::builder("name", FieldType::Str)
//!             .required()
//!             .validator(StrValidator::new().min_length(1).max_length(100))
//!             .build()
//!             .unwrap(),
//!     )
//!     .field(
//!         FieldDescriptor::builder("age", FieldType::Int)
//!             .validator(IntegerValidator::new().min_value(0))
//!             .build()
//!             .unwrap(),
//!     )
//!     .build();
//!
//! let raw = json!({"name": "alice", "age": "30"});
//! let record = schema
//!     .validate(raw.as_object().unwrap())
//!     .into_result()
//!     .unwrap();
//! assert_eq!(record.get("age"), Some(&FieldValue::Int(30)));
//!
//! // Invalid records report every failing field
//! let raw = json!({"age": -1});
//! let report = schema
//!     .validate(raw.as_object().unwrap())
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(report.len(), 2);
//! ```

pub mod error;
pub mod field;
pub mod interop;
pub mod record;
pub mod registry;
pub mod validator;
pub mod value;

pub use error::{ErrorReport, FieldError};
pub use field::{
    DefaultFactoryFn, DefaultValue, DumpFn, FieldBuilder, FieldConfigError, FieldDescriptor,
    FieldOps, PostProcessFn,
};
pub use interop::ToJsonSchema;
pub use record::{RawRecord, Record, RecordSchema, RecordSchemaBuilder};
pub use registry::{RegistryError, SchemaRegistry};
pub use validator::{
    BoolValidator, Bounds, ChainValidator, ChoiceValidator, DateTimeValidator, DateValidator,
    DecimalValidator, EmailValidator, EnumValidator, FieldValidator, IntegerValidator,
    JsonValidator, NumberValidator, SchemaNumber, StrValidator, UuidValidator, Validator,
};
pub use value::{EnumMember, EnumType, FieldType, FieldValue};

/// Type alias for single-field validation outcomes.
pub type FieldResult = stillwater::Validation<FieldValue, FieldError>;

/// Type alias for record validation results using ErrorReport
pub type ValidationResult<T> = stillwater::Validation<T, ErrorReport>;
