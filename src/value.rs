//! The typed value algebra.
//!
//! This module provides [`FieldValue`], the closed union of every internal
//! value kind a validator can produce, along with [`FieldType`] for declared
//! field types and [`EnumType`] for runtime-declared enumerations.
//!
//! Raw wire values arrive as `serde_json::Value` and enter the engine through
//! [`FieldValue::from_json`]. Validators transform `FieldValue`s; the dump
//! direction leaves the engine through [`FieldValue::to_json`].

use std::fmt::{self, Display};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

/// A runtime-declared enumeration: a name plus an ordered set of member names.
///
/// `EnumType` is shared by `Arc` between the field descriptor that declares it
/// and the validator that checks against it. Member matching is case-sensitive
/// and exact.
///
/// # Example
///
/// ```rust
/// use fieldcast::EnumType;
///
/// let color = EnumType::new("Color", ["RED", "GREEN", "BLUE"]);
/// assert!(color.contains("RED"));
/// assert!(!color.contains("red"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    /// Creates a new enum type with the given name and member names.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member names in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Returns true when `name` exactly matches a declared member.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

/// A member of an [`EnumType`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    ty: Arc<EnumType>,
    name: String,
}

impl EnumMember {
    /// Creates a member of `ty`, or `None` if `name` is not declared on it.
    pub fn new(ty: Arc<EnumType>, name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if ty.contains(&name) {
            Some(Self { ty, name })
        } else {
            None
        }
    }

    /// The enum type this member belongs to.
    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }

    /// The member name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The declared type of a field after successful validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Str,
    Bool,
    Int,
    Float,
    Decimal,
    Date,
    DateTime,
    Json,
    Enum(Arc<EnumType>),
}

impl FieldType {
    /// The JSON Schema `type` keyword for this declared type.
    pub fn json_schema_type(&self) -> &'static str {
        match self {
            FieldType::Str | FieldType::Date | FieldType::DateTime => "string",
            FieldType::Bool => "boolean",
            FieldType::Int => "integer",
            FieldType::Float | FieldType::Decimal => "number",
            FieldType::Json => "object",
            FieldType::Enum(_) => "string",
        }
    }
}

/// An internal typed value.
///
/// `FieldValue` is the single value type flowing through the engine: raw wire
/// values are converted in with [`FieldValue::from_json`], validators coerce
/// between variants, and [`FieldValue::to_json`] produces the externally-safe
/// wire form again.
///
/// The variant set is closed on purpose: every validator is a tagged case over
/// these kinds, dispatched statically.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
    Uuid(Uuid),
    Enum(EnumMember),
    Json(Value),
}

impl FieldValue {
    /// Converts a raw wire value into a `FieldValue`.
    ///
    /// Numbers split into `Int` (when representable as `i64`) and `Float`;
    /// arrays and objects are carried as `Json` without inspection.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Str(s.clone()),
            Value::Array(_) | Value::Object(_) => FieldValue::Json(value.clone()),
        }
    }

    /// Converts this value into its externally-safe wire representation.
    ///
    /// Dates and timestamps become ISO-8601 strings, UUIDs their 32-character
    /// lowercase hex digest, enum members their name, and decimals their exact
    /// string form so no binary-float artifact can appear on the wire.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Decimal(d) => Value::String(d.to_string()),
            FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            FieldValue::NaiveDateTime(dt) => {
                Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            FieldValue::Uuid(u) => Value::String(u.simple().to_string()),
            FieldValue::Enum(m) => Value::String(m.name().to_string()),
            FieldValue::Json(v) => v.clone(),
        }
    }

    /// Returns the string slice when this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    /// The text form interpolated into validation error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Decimal(d) => write!(f, "{}", d),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FieldValue::NaiveDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            FieldValue::Uuid(u) => write!(f, "{}", u),
            FieldValue::Enum(m) => write!(f, "{}", m.name()),
            FieldValue::Json(v) => write!(f, "{}", v),
        }
    }
}
