//! Interoperability with other schema formats.
//!
//! This module provides export of fieldcast record schemas to
//! industry-standard formats like JSON Schema.

pub mod json_schema;

pub use json_schema::ToJsonSchema;
