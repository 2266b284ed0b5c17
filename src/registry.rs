//! Schema registry for named record-schema storage.
//!
//! This module provides the [`SchemaRegistry`] type that stores record
//! schemas by name and drives validation, dumping and JSON Schema export
//! through those names.

use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::interop::ToJsonSchema;
use crate::record::{RawRecord, Record, RecordSchema};
use crate::ValidationResult;

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, Arc<RecordSchema>>>>;

/// A thread-safe registry for storing and retrieving named record schemas.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Cloning a registry produces a handle sharing the same storage.
///
/// # Example
///
/// ```rust
/// use fieldcast::{
///     FieldDescriptor, FieldType, IntegerValidator, RecordSchema, SchemaRegistry, StrValidator,
/// };
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register(
///         RecordSchema::builder("User")
///             .field(
///                 FieldDescriptor::builder("name", FieldType::Str)
///                     .required()
///                     .validator(StrValidator::new().min_length(1))
///                     .build()
///                     .unwrap(),
///             )
///             .build(),
///     )
///     .unwrap();
///
/// let raw = json!({"name": "alice"});
/// let result = registry.validate("User", raw.as_object().unwrap()).unwrap();
/// assert!(result.is_success());
/// ```
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    /// Creates a new empty schema registry.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a schema under its own name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldcast::{RecordSchema, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register(RecordSchema::builder("User").build()).unwrap();
    ///
    /// // Duplicate registration fails
    /// assert!(registry
    ///     .register(RecordSchema::builder("User").build())
    ///     .is_err());
    /// ```
    pub fn register(&self, schema: RecordSchema) -> Result<(), RegistryError> {
        let name = schema.name().to_string();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    /// Retrieves a schema by name.
    ///
    /// Returns `None` if no schema with the given name is registered.
    pub fn get(&self, name: &str) -> Option<Arc<RecordSchema>> {
        self.schemas.read().get(name).cloned()
    }

    /// Validates a raw record against a named schema.
    ///
    /// This is the main entry point for validation when using the registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the schema name doesn't exist.
    pub fn validate(
        &self,
        schema_name: &str,
        data: &RawRecord,
    ) -> Result<ValidationResult<Record>, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))?;
        Ok(schema.validate(data))
    }

    /// Dumps a validated record through a named schema.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the schema name doesn't exist.
    pub fn dump(&self, schema_name: &str, record: &Record) -> Result<RawRecord, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))?;
        Ok(schema.dump(record))
    }

    /// Exports all registered schemas as a JSON Schema document with $defs.
    ///
    /// Returns a JSON Schema document following draft 2020-12 with all
    /// registered schemas under the `$defs` key.
    pub fn to_json_schema(&self) -> Value {
        let schemas = self.schemas.read();
        let mut defs = serde_json::Map::new();

        for (name, schema) in schemas.iter() {
            defs.insert(name.clone(), schema.to_json_schema());
        }

        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$defs": defs
        })
    }

    /// Exports a single schema as a standalone JSON Schema document.
    ///
    /// Returns `None` if the schema doesn't exist.
    pub fn export_schema(&self, name: &str) -> Option<Value> {
        let schema = self.get(name)?;

        let mut result = schema.to_json_schema();
        result["$schema"] = json!("https://json-schema.org/draft/2020-12/schema");
        Some(result)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to use a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use crate::validator::StrValidator;
    use crate::value::{FieldType, FieldValue};
    use serde_json::Map;

    fn user_schema() -> RecordSchema {
        RecordSchema::builder("User")
            .field(
                FieldDescriptor::builder("name", FieldType::Str)
                    .required()
                    .validator(StrValidator::new().min_length(1))
                    .build()
                    .unwrap(),
            )
            .build()
    }

    #[test]
    fn test_register_and_get() {
        let registry = SchemaRegistry::new();
        registry.register(user_schema()).unwrap();
        assert!(registry.get("User").is_some());
        assert!(registry.get("Unknown").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let registry = SchemaRegistry::new();
        registry.register(user_schema()).unwrap();
        let err = registry.register(user_schema()).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "User"));
    }

    #[test]
    fn test_validate_by_name() {
        let registry = SchemaRegistry::new();
        registry.register(user_schema()).unwrap();

        let raw = json!({"name": "alice"});
        let result = registry.validate("User", raw.as_object().unwrap()).unwrap();
        assert!(result.is_success());
    }

    #[test]
    fn test_unknown_schema_name() {
        let registry = SchemaRegistry::new();
        let err = registry.validate("Missing", &Map::new()).unwrap_err();
        assert!(matches!(err, RegistryError::SchemaNotFound(name) if name == "Missing"));
    }

    #[test]
    fn test_dump_by_name() {
        let registry = SchemaRegistry::new();
        registry.register(user_schema()).unwrap();

        let mut record = Record::new();
        record.insert("name".to_string(), FieldValue::Str("alice".into()));
        let out = registry.dump("User", &record).unwrap();
        assert_eq!(out.get("name"), Some(&json!("alice")));
    }

    #[test]
    fn test_clone_shares_storage() {
        let registry = SchemaRegistry::new();
        let handle = registry.clone();
        registry.register(user_schema()).unwrap();
        assert!(handle.get("User").is_some());
    }
}
