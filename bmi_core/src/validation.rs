//! Form input validation.
//!
//! Raw text fields are checked together and every failing field is
//! reported, so a user can fix all of them in one pass.

use crate::Measurement;
use serde::Serialize;
use std::fmt;

pub const WEIGHT_MIN_KG: f64 = 20.0;
pub const WEIGHT_MAX_KG: f64 = 300.0;
pub const FEET_MIN: i64 = 1;
pub const FEET_MAX: i64 = 8;
pub const INCHES_MIN: i64 = 0;
pub const INCHES_MAX: i64 = 11;

/// Input field a validation message belongs to
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Weight,
    Feet,
    Inches,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Weight => write!(f, "weight"),
            Field::Feet => write!(f, "feet"),
            Field::Inches => write!(f, "inches"),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// All per-field failures from one validation pass
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message for a field, if that field failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate the three raw form fields and build a [`Measurement`]
pub fn validate(weight: &str, feet: &str, inches: &str) -> Result<Measurement, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let weight = check_weight(weight.trim(), &mut errors);
    let feet = check_feet(feet.trim(), &mut errors);
    let inches = check_inches(inches.trim(), &mut errors);

    match (weight, feet, inches) {
        (Some(weight_kg), Some(feet), Some(inches)) if errors.is_empty() => {
            tracing::debug!("Validated input: {} kg, {}ft {}in", weight_kg, feet, inches);
            Ok(Measurement {
                weight_kg,
                feet,
                inches,
            })
        }
        _ => {
            tracing::debug!("Input rejected: {}", errors);
            Err(errors)
        }
    }
}

impl Measurement {
    /// Build a measurement from already-typed values, applying the same
    /// range rules as [`validate`]
    pub fn new(weight_kg: f64, feet: u8, inches: u8) -> Result<Self, ValidationErrors> {
        validate(
            &weight_kg.to_string(),
            &feet.to_string(),
            &inches.to_string(),
        )
    }
}

fn check_weight(raw: &str, errors: &mut ValidationErrors) -> Option<f64> {
    let value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            errors.push(Field::Weight, "Please enter a valid weight");
            return None;
        }
    };

    if !(WEIGHT_MIN_KG..=WEIGHT_MAX_KG).contains(&value) {
        errors.push(Field::Weight, "Weight must be between 20-300 kg");
        return None;
    }
    Some(value)
}

fn check_feet(raw: &str, errors: &mut ValidationErrors) -> Option<u8> {
    let value = match raw.parse::<i64>() {
        Ok(v) if v >= 0 => v,
        _ => {
            errors.push(Field::Feet, "Please enter valid feet");
            return None;
        }
    };

    if !(FEET_MIN..=FEET_MAX).contains(&value) {
        errors.push(Field::Feet, "Feet must be between 1-8");
        return None;
    }
    u8::try_from(value).ok()
}

fn check_inches(raw: &str, errors: &mut ValidationErrors) -> Option<u8> {
    match raw.parse::<i64>() {
        Ok(v) if (INCHES_MIN..=INCHES_MAX).contains(&v) => u8::try_from(v).ok(),
        _ => {
            errors.push(Field::Inches, "Inches must be 0-11");
            None
        }
    }
}
