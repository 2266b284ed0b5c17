//! Field validation error types.
//!
//! This module provides [`FieldError`] for single field failures and
//! [`ErrorReport`] for collecting failures across a whole record.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::prelude::*;

/// A single field validation error.
///
/// Every failure inside the engine is scoped to exactly one field: the
/// offending field's name plus a short human-readable message. Validators
/// never let unexpected input shapes escape as anything other than this type.
///
/// # Example
///
/// ```rust
/// use fieldcast::FieldError;
///
/// let error = FieldError::new("email", "Must be a string");
/// assert_eq!(error.to_string(), "email: Must be a string");
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// The name of the field that failed validation.
    pub field: String,
    /// Human-readable failure message.
    pub message: String,
}

impl FieldError {
    /// Creates a new error for `field` with the given message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// FieldError is Send + Sync since both fields are owned Strings.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<FieldError>();
    assert_sync::<FieldError>();
};

/// A non-empty collection of field validation errors.
///
/// `ErrorReport` wraps a `NonEmptyVec<FieldError>` so a failed
/// `Validation<T, ErrorReport>` always carries at least one error. Reports
/// combine through `Semigroup`, which is how errors from independent fields
/// of one record end up in a single report.
///
/// The [`by_field`](ErrorReport::by_field) view produces the external caller
/// contract: an ordered mapping from field name to one or more messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport(NonEmptyVec<FieldError>);

impl ErrorReport {
    /// Creates a report containing a single error.
    pub fn single(error: FieldError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a report from a `Vec<FieldError>`.
    ///
    /// # Panics
    ///
    /// Panics if the provided vec is empty.
    pub fn from_vec(errors: Vec<FieldError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("ErrorReport requires at least one error"))
    }

    /// Returns the number of errors in this report.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns the first error in the report.
    pub fn first(&self) -> &FieldError {
        self.0.head()
    }

    /// Returns all messages recorded for the given field.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Returns the report as an ordered mapping from field name to messages.
    ///
    /// Field order follows first appearance, so callers iterating the map see
    /// errors in declaration order of the record's fields.
    pub fn by_field(&self) -> IndexMap<String, Vec<String>> {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for error in self.0.iter() {
            map.entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        map
    }

    /// Converts this report into a `Vec<FieldError>`.
    pub fn into_vec(self) -> Vec<FieldError> {
        self.0.into_vec()
    }
}

impl Semigroup for ErrorReport {
    fn combine(self, other: Self) -> Self {
        ErrorReport(self.0.combine(other.0))
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

impl IntoIterator for ErrorReport {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// ErrorReport is Send + Sync since it only contains FieldError.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorReport>();
    assert_sync::<ErrorReport>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let error = FieldError::new("age", "5 greater than 3");
        assert_eq!(error.to_string(), "age: 5 greater than 3");
    }

    #[test]
    fn test_report_single() {
        let report = ErrorReport::single(FieldError::new("name", "Too short"));
        assert_eq!(report.len(), 1);
        assert!(!report.is_empty());
        assert_eq!(report.first().field, "name");
    }

    #[test]
    fn test_report_combine() {
        let a = ErrorReport::single(FieldError::new("a", "first"));
        let b = ErrorReport::single(FieldError::new("b", "second"));
        let combined = a.combine(b);
        assert_eq!(combined.len(), 2);
        let fields: Vec<_> = combined.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_by_field_groups_messages() {
        let report = ErrorReport::from_vec(vec![
            FieldError::new("a", "first"),
            FieldError::new("b", "other"),
            FieldError::new("a", "second"),
        ]);
        let map = report.by_field();
        assert_eq!(map.get("a").unwrap(), &vec!["first", "second"]);
        assert_eq!(map.get("b").unwrap(), &vec!["other"]);
        // first-appearance order
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_messages_for() {
        let report = ErrorReport::from_vec(vec![
            FieldError::new("a", "first"),
            FieldError::new("a", "second"),
        ]);
        assert_eq!(report.messages_for("a"), vec!["first", "second"]);
        assert!(report.messages_for("missing").is_empty());
    }

    #[test]
    fn test_report_display() {
        let report = ErrorReport::from_vec(vec![
            FieldError::new("name", "required"),
            FieldError::new("email", "not valid"),
        ]);
        let display = report.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("name: required"));
        assert!(display.contains("email: not valid"));
    }
}
