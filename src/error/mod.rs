//! Error types for validation failures.
//!
//! This module provides the single field-scoped error kind produced by
//! validators and the non-empty report type that aggregates errors across a
//! whole record.

mod field_error;

pub use field_error::{ErrorReport, FieldError};
