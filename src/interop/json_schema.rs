//! JSON Schema interoperability.
//!
//! This module provides conversion from fieldcast record schemas to JSON
//! Schema format. JSON Schema is the industry standard for describing JSON
//! data structures, enabling integration with existing tools and
//! documentation systems.

use serde_json::{json, Value};

use crate::record::RecordSchema;

/// Trait for converting schema types to JSON Schema format.
///
/// Implementers of this trait can be exported as JSON Schema documents
/// compatible with draft 2020-12.
pub trait ToJsonSchema {
    /// Converts this schema to a JSON Schema representation.
    ///
    /// Returns a `serde_json::Value` containing the JSON Schema object.
    /// The schema follows the JSON Schema draft 2020-12 specification.
    fn to_json_schema(&self) -> Value;
}

impl ToJsonSchema for RecordSchema {
    /// An object schema: per-field properties from
    /// [`RecordSchema::properties`] plus the `required` field names.
    fn to_json_schema(&self) -> Value {
        let mut schema = serde_json::Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(self.properties()));

        let required = self.required_fields();
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }

        Value::Object(schema)
    }
}
