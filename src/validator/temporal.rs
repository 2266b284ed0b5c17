//! Date and date-time validation.
//!
//! Both validators give string input a best-effort parse first, leaving the
//! raw value untouched when parsing fails so the final type check produces
//! the error. This two-stage attempt is intentional: an unparsable string
//! falls through to the "not valid format" failure rather than failing at
//! the parse itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use stillwater::Validation;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::FieldValidator;

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    None
}

fn parse_date_time(s: &str) -> Option<FieldValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(FieldValue::DateTime(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(FieldValue::NaiveDateTime(dt));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(FieldValue::NaiveDateTime(dt));
    }
    // a bare calendar date parses to midnight
    if let Some(dt) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(FieldValue::NaiveDateTime(dt));
    }
    None
}

/// Validates calendar dates.
///
/// Date-time values count as date-like and pass through unchanged; the dump
/// direction then emits only their date portion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateValidator;

impl DateValidator {
    /// Creates a date validator.
    pub fn new() -> Self {
        Self
    }
}

impl FieldValidator for DateValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let value = match value {
            FieldValue::Str(s) => match parse_date(&s) {
                Some(d) => FieldValue::Date(d),
                None => FieldValue::Str(s),
            },
            other => other,
        };
        match value {
            FieldValue::Date(_) | FieldValue::DateTime(_) | FieldValue::NaiveDateTime(_) => {
                Validation::Success(value)
            }
            other => Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid format", other),
            )),
        }
    }

    /// ISO-8601 calendar date; date-time values emit only the date portion.
    fn dump(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Date(d) => FieldValue::Str(d.format("%Y-%m-%d").to_string()),
            FieldValue::DateTime(dt) => {
                FieldValue::Str(dt.date_naive().format("%Y-%m-%d").to_string())
            }
            FieldValue::NaiveDateTime(dt) => {
                FieldValue::Str(dt.date().format("%Y-%m-%d").to_string())
            }
            other => other,
        }
    }
}

/// Validates full date-and-time values.
///
/// When [`require_timezone`](DateTimeValidator::require_timezone) is set, a
/// parsed value without timezone information is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeValidator {
    timezone: bool,
}

impl DateTimeValidator {
    /// Creates a date-time validator that accepts naive timestamps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires parsed values to carry timezone information.
    pub fn require_timezone(mut self) -> Self {
        self.timezone = true;
        self
    }
}

impl FieldValidator for DateTimeValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let value = match value {
            FieldValue::Str(s) => parse_date_time(&s).unwrap_or(FieldValue::Str(s)),
            other => other,
        };
        match value {
            FieldValue::DateTime(_) => Validation::Success(value),
            FieldValue::NaiveDateTime(_) => {
                if self.timezone {
                    Validation::Failure(FieldError::new(
                        field.name(),
                        "Timezone information required",
                    ))
                } else {
                    Validation::Success(value)
                }
            }
            other => Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid format", other),
            )),
        }
    }

    /// Full ISO-8601 timestamp.
    fn dump(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::DateTime(dt) => FieldValue::Str(dt.to_rfc3339()),
            FieldValue::NaiveDateTime(dt) => {
                FieldValue::Str(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            other => other,
        }
    }
}
