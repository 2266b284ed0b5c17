//! Field descriptors.
//!
//! This module provides [`FieldDescriptor`], the immutable metadata describing
//! one field of a record type: declared type, requiredness, defaulting policy,
//! attached validator, dump override, schema tags, post-processing and the
//! operation-suffix set used by filterable-query callers.
//!
//! Descriptors are constructed through [`FieldBuilder`] and never mutated
//! afterwards; the recognized set of options is fixed and enumerable.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::validator::Validator;
use crate::value::{FieldType, FieldValue};

/// Function replacing the validator's own dump for the output direction.
pub type DumpFn = Arc<dyn Fn(&FieldValue) -> Value + Send + Sync>;

/// Function applied to an already-validated value before it is stored.
pub type PostProcessFn = Arc<dyn Fn(FieldValue) -> FieldValue + Send + Sync>;

/// Function producing a default value on demand.
pub type DefaultFactoryFn = Arc<dyn Fn() -> FieldValue + Send + Sync>;

/// The defaulting policy of a field.
///
/// Modeled as a tagged variant so the mutual exclusivity of a constant
/// default and a default-producing function is structural: a built descriptor
/// can only ever hold one of them.
#[derive(Clone)]
pub enum DefaultValue {
    /// No default; an absent, non-required field stays absent.
    None,
    /// A constant value supplied when the field is absent.
    Constant(FieldValue),
    /// A function invoked to produce the value when the field is absent.
    Factory(DefaultFactoryFn),
}

impl DefaultValue {
    /// Produces the default value, if any.
    pub fn produce(&self) -> Option<FieldValue> {
        match self {
            DefaultValue::None => None,
            DefaultValue::Constant(v) => Some(v.clone()),
            DefaultValue::Factory(f) => Some(f()),
        }
    }
}

/// Configuration errors reported when building a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum FieldConfigError {
    /// Both a constant default and a default factory were configured.
    #[error("field '{0}': default and default_factory are mutually exclusive")]
    ConflictingDefaults(String),
}

/// Immutable metadata describing one field of a record type.
///
/// # Example
///
/// ```rust
/// use fieldcast::{FieldDescriptor, FieldType, StrValidator};
///
/// let field = FieldDescriptor::builder("username", FieldType::Str)
///     .required()
///     .validator(StrValidator::new().min_length(3).max_length(32))
///     .description("login name")
///     .build()
///     .unwrap();
///
/// assert_eq!(field.name(), "username");
/// assert!(field.required());
/// ```
pub struct FieldDescriptor {
    name: String,
    declared_type: FieldType,
    required: bool,
    default: DefaultValue,
    validator: Option<Validator>,
    dump_override: Option<DumpFn>,
    format: Option<String>,
    description: Option<String>,
    post_process: Option<PostProcessFn>,
    operations: Vec<String>,
}

impl FieldDescriptor {
    /// Starts building a descriptor for `name` with the given declared type.
    pub fn builder(name: impl Into<String>, declared_type: FieldType) -> FieldBuilder {
        FieldBuilder {
            name: name.into(),
            declared_type,
            required: false,
            default: None,
            default_factory: None,
            validator: None,
            dump_override: None,
            format: None,
            description: None,
            post_process: None,
            operations: Vec::new(),
        }
    }

    /// The field name, unique within a record type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The semantic type the field holds after successful validation.
    pub fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    /// Whether absence of the raw value is an error.
    pub fn required(&self) -> bool {
        self.required
    }

    /// The attached validator, if any.
    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// The defaulting policy.
    pub fn default_value(&self) -> &DefaultValue {
        &self.default
    }

    /// The dump override replacing the validator's own dump, if any.
    pub fn dump_override(&self) -> Option<&DumpFn> {
        self.dump_override.as_ref()
    }

    /// The schema format tag, surfaced verbatim into generated schemas.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// The schema-only human-readable description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The post-processing function applied after validator success.
    pub fn post_process(&self) -> Option<&PostProcessFn> {
        self.post_process.as_ref()
    }

    /// The declared operation suffixes.
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Enumerates the field's operation names.
    ///
    /// Yields the bare field name first, then `name:op` for every declared
    /// operation suffix in declaration order. The iterator is finite and
    /// restartable: calling `ops()` again replays the same sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldcast::{FieldDescriptor, FieldType};
    ///
    /// let field = FieldDescriptor::builder("amount", FieldType::Int)
    ///     .operations(["gt", "lte"])
    ///     .build()
    ///     .unwrap();
    ///
    /// let names: Vec<_> = field.ops().collect();
    /// assert_eq!(names, vec!["amount", "amount:gt", "amount:lte"]);
    /// ```
    pub fn ops(&self) -> FieldOps<'_> {
        FieldOps {
            field: self,
            index: 0,
        }
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("required", &self.required)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

/// Iterator over a field's operation names.
///
/// See [`FieldDescriptor::ops`].
pub struct FieldOps<'a> {
    field: &'a FieldDescriptor,
    index: usize,
}

impl Iterator for FieldOps<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let item = if self.index == 0 {
            Some(self.field.name.clone())
        } else {
            self.field
                .operations
                .get(self.index - 1)
                .map(|op| format!("{}:{}", self.field.name, op))
        };
        if item.is_some() {
            self.index += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.field.operations.len() + 1).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FieldOps<'_> {}

/// Builder for [`FieldDescriptor`].
///
/// Configuring both a constant default and a default factory is a
/// configuration error reported by [`build`](FieldBuilder::build).
pub struct FieldBuilder {
    name: String,
    declared_type: FieldType,
    required: bool,
    default: Option<FieldValue>,
    default_factory: Option<DefaultFactoryFn>,
    validator: Option<Validator>,
    dump_override: Option<DumpFn>,
    format: Option<String>,
    description: Option<String>,
    post_process: Option<PostProcessFn>,
    operations: Vec<String>,
}

impl FieldBuilder {
    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches a validator.
    pub fn validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validator = Some(validator.into());
        self
    }

    /// Sets a constant default value.
    pub fn default_value(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets a default-producing function.
    pub fn default_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        self.default_factory = Some(Arc::new(factory));
        self
    }

    /// Replaces the validator's own dump for the output direction.
    pub fn dump<F>(mut self, dump: F) -> Self
    where
        F: Fn(&FieldValue) -> Value + Send + Sync + 'static,
    {
        self.dump_override = Some(Arc::new(dump));
        self
    }

    /// Sets the schema format tag (e.g. `"uuid"`).
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the schema-only description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a post-processing function, applied to the already-validated
    /// value before it is stored. Never runs on failure.
    pub fn post_process<F>(mut self, post_process: F) -> Self
    where
        F: Fn(FieldValue) -> FieldValue + Send + Sync + 'static,
    {
        self.post_process = Some(Arc::new(post_process));
        self
    }

    /// Declares the operation suffixes enumerated by [`FieldDescriptor::ops`].
    pub fn operations<I, S>(mut self, operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operations = operations.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`FieldConfigError::ConflictingDefaults`] when both a constant
    /// default and a default factory were configured.
    pub fn build(self) -> Result<FieldDescriptor, FieldConfigError> {
        let default = match (self.default, self.default_factory) {
            (Some(_), Some(_)) => return Err(FieldConfigError::ConflictingDefaults(self.name)),
            (Some(value), None) => DefaultValue::Constant(value),
            (None, Some(factory)) => DefaultValue::Factory(factory),
            (None, None) => DefaultValue::None,
        };

        Ok(FieldDescriptor {
            name: self.name,
            declared_type: self.declared_type,
            required: self.required,
            default,
            validator: self.validator,
            dump_override: self.dump_override,
            format: self.format,
            description: self.description,
            post_process: self.post_process,
            operations: self.operations,
        })
    }
}
