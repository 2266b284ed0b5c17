//! Numeric validation.
//!
//! This module provides the shared [`Bounds`] range check plus the three
//! numeric validators: [`NumberValidator`] (floats with optional half-even
//! precision rounding), [`IntegerValidator`] (strict integers, no rounding)
//! and [`DecimalValidator`] (exact decimals built from decimal string
//! representations, never through binary-float conversion).

use std::fmt::Display;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::error::FieldError;
use crate::field::FieldDescriptor;
use crate::record::RawRecord;
use crate::value::FieldValue;
use crate::FieldResult;

use super::FieldValidator;

/// A numeric kind usable as a bound and representable in a property schema.
pub trait SchemaNumber: PartialOrd + Display + Copy {
    /// The JSON form emitted for `minimum`/`maximum` keywords.
    fn schema_value(&self) -> Value;
}

impl SchemaNumber for i64 {
    fn schema_value(&self) -> Value {
        json!(self)
    }
}

impl SchemaNumber for f64 {
    fn schema_value(&self) -> Value {
        json!(self)
    }
}

impl SchemaNumber for Decimal {
    fn schema_value(&self) -> Value {
        self.to_f64()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| json!(self.to_string()))
    }
}

/// The range check shared by every numeric validator.
///
/// Bound checks run after the subtype has coerced the value to its numeric
/// kind. Schema contribution emits `minimum`/`maximum` when set.
#[derive(Debug, Clone, Default)]
pub struct Bounds<T> {
    min_value: Option<T>,
    max_value: Option<T>,
}

impl<T: SchemaNumber> Bounds<T> {
    /// Creates unbounded bounds.
    pub fn new() -> Self {
        Self {
            min_value: None,
            max_value: None,
        }
    }

    /// Sets the inclusive minimum.
    pub fn min_value(mut self, min: T) -> Self {
        self.min_value = Some(min);
        self
    }

    /// Sets the inclusive maximum.
    pub fn max_value(mut self, max: T) -> Self {
        self.max_value = Some(max);
        self
    }

    fn check(&self, field: &FieldDescriptor, value: T) -> Option<FieldError> {
        if let Some(min) = self.min_value {
            if value < min {
                return Some(FieldError::new(
                    field.name(),
                    format!("{} less than {}", value, min),
                ));
            }
        }
        if let Some(max) = self.max_value {
            if value > max {
                return Some(FieldError::new(
                    field.name(),
                    format!("{} greater than {}", value, max),
                ));
            }
        }
        None
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        if let Some(min) = self.min_value {
            prop.insert("minimum".to_string(), min.schema_value());
        }
        if let Some(max) = self.max_value {
            prop.insert("maximum".to_string(), max.schema_value());
        }
    }
}

/// Rounds to `digits` decimal places with round-half-to-even semantics.
fn round_half_even(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}

/// Validates numbers, with optional bounds and precision rounding.
///
/// When a precision (decimal-places count) is configured the value is
/// rounded half-to-even *before* bound checking, and the dump direction
/// re-applies the same rounding. Integers pass through unrounded.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    bounds: Bounds<f64>,
    precision: Option<u32>,
}

impl NumberValidator {
    /// Creates an unbounded number validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive minimum.
    pub fn min_value(mut self, min: f64) -> Self {
        self.bounds = self.bounds.min_value(min);
        self
    }

    /// Sets the inclusive maximum.
    pub fn max_value(mut self, max: f64) -> Self {
        self.bounds = self.bounds.max_value(max);
        self
    }

    /// Sets the decimal-places precision.
    pub fn precision(mut self, digits: u32) -> Self {
        self.precision = Some(digits);
        self
    }
}

impl FieldValidator for NumberValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let (value, numeric) = match value {
            FieldValue::Int(i) => (FieldValue::Int(i), i as f64),
            FieldValue::Float(f) => {
                let f = match self.precision {
                    Some(digits) => round_half_even(f, digits),
                    None => f,
                };
                (FieldValue::Float(f), f)
            }
            other => {
                return Validation::Failure(FieldError::new(
                    field.name(),
                    format!("{} not valid number", other),
                ));
            }
        };
        match self.bounds.check(field, numeric) {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(value),
        }
    }

    fn dump(&self, value: FieldValue) -> FieldValue {
        match (value, self.precision) {
            (FieldValue::Float(f), Some(digits)) => FieldValue::Float(round_half_even(f, digits)),
            (other, _) => other,
        }
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        self.bounds.describe_schema(prop);
    }
}

/// Validates integers, with optional bounds.
///
/// Floats are rejected even when numerically integral; strings must parse
/// as an integer. No rounding ever happens.
#[derive(Debug, Clone, Default)]
pub struct IntegerValidator {
    bounds: Bounds<i64>,
}

impl IntegerValidator {
    /// Creates an unbounded integer validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive minimum.
    pub fn min_value(mut self, min: i64) -> Self {
        self.bounds = self.bounds.min_value(min);
        self
    }

    /// Sets the inclusive maximum.
    pub fn max_value(mut self, max: i64) -> Self {
        self.bounds = self.bounds.max_value(max);
        self
    }
}

impl FieldValidator for IntegerValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let parsed = match &value {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Str(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        let Some(i) = parsed else {
            return Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid integer", value),
            ));
        };
        match self.bounds.check(field, i) {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(FieldValue::Int(i)),
        }
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        self.bounds.describe_schema(prop);
    }
}

/// Validates exact decimal values, with optional bounds and precision.
///
/// Floats are converted through their decimal string representation before
/// the exact decimal is constructed, so `0.1` becomes the decimal `0.1`
/// rather than the nearest binary-float expansion. Precision rounding uses
/// the same half-even semantics as [`NumberValidator`], then bounds apply.
#[derive(Debug, Clone, Default)]
pub struct DecimalValidator {
    bounds: Bounds<Decimal>,
    precision: Option<u32>,
}

impl DecimalValidator {
    /// Creates an unbounded decimal validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive minimum.
    pub fn min_value(mut self, min: Decimal) -> Self {
        self.bounds = self.bounds.min_value(min);
        self
    }

    /// Sets the inclusive maximum.
    pub fn max_value(mut self, max: Decimal) -> Self {
        self.bounds = self.bounds.max_value(max);
        self
    }

    /// Sets the decimal-places precision.
    pub fn precision(mut self, digits: u32) -> Self {
        self.precision = Some(digits);
        self
    }

    fn round(&self, value: Decimal) -> Decimal {
        match self.precision {
            Some(digits) => {
                // rescale pads trailing zeros so 0.1 at precision 2 is 0.10
                let mut rounded =
                    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
                rounded.rescale(digits);
                rounded
            }
            None => value,
        }
    }
}

impl FieldValidator for DecimalValidator {
    fn validate(
        &self,
        field: &FieldDescriptor,
        value: FieldValue,
        _data: &RawRecord,
    ) -> FieldResult {
        let parsed = match &value {
            FieldValue::Decimal(d) => Some(*d),
            FieldValue::Int(i) => Some(Decimal::from(*i)),
            // through the decimal string form, never the binary expansion
            FieldValue::Float(f) => f.to_string().parse::<Decimal>().ok(),
            FieldValue::Str(s) => s.trim().parse::<Decimal>().ok(),
            _ => None,
        };
        let Some(d) = parsed else {
            return Validation::Failure(FieldError::new(
                field.name(),
                format!("{} not valid Decimal", value),
            ));
        };
        let d = self.round(d);
        match self.bounds.check(field, d) {
            Some(error) => Validation::Failure(error),
            None => Validation::Success(FieldValue::Decimal(d)),
        }
    }

    fn dump(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Decimal(d) => FieldValue::Decimal(self.round(d)),
            other => other,
        }
    }

    fn describe_schema(&self, prop: &mut Map<String, Value>) {
        self.bounds.describe_schema(prop);
    }
}
