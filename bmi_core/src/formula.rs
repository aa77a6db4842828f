//! BMI formula and imperial-to-metric height conversion.
//!
//! All functions here are pure: weight in kilograms, height in feet and
//! inches, BMI = kg / m².

use crate::category::categorize;
use crate::{BmiResult, Error, HistoryEntry, Measurement, NewEntry, Result};

pub const METERS_PER_INCH: f64 = 0.0254;
pub const INCHES_PER_FOOT: u32 = 12;

/// Lower and upper BMI of the WHO "normal" band used for the ideal range
pub const IDEAL_BMI_MIN: f64 = 18.5;
pub const IDEAL_BMI_MAX: f64 = 24.9;

/// Convert feet + inches to meters
pub fn height_in_meters(feet: u8, inches: u8) -> f64 {
    let total_inches = u32::from(feet) * INCHES_PER_FOOT + u32::from(inches);
    f64::from(total_inches) * METERS_PER_INCH
}

/// Compute the BMI score for a weight and height
///
/// Fails with [`Error::InvalidInput`] on a zero height or a weight that is
/// not a positive finite number.
pub fn compute_bmi(weight_kg: f64, feet: u8, inches: u8) -> Result<f64> {
    let height_m = checked_height(feet, inches)?;
    check_weight(weight_kg)?;
    Ok(weight_kg / (height_m * height_m))
}

/// Weight range (kg) that puts this height inside the 18.5-24.9 band
pub fn ideal_weight_range(feet: u8, inches: u8) -> Result<(f64, f64)> {
    let height_m = checked_height(feet, inches)?;
    let squared = height_m * height_m;
    Ok((IDEAL_BMI_MIN * squared, IDEAL_BMI_MAX * squared))
}

/// Full calculation: score, category and ideal weight range
pub fn calculate(weight_kg: f64, feet: u8, inches: u8) -> Result<BmiResult> {
    let bmi = compute_bmi(weight_kg, feet, inches)?;
    let (ideal_weight_min, ideal_weight_max) = ideal_weight_range(feet, inches)?;

    tracing::debug!(
        "Calculated BMI {:.2} for {} kg at {}ft {}in",
        bmi,
        weight_kg,
        feet,
        inches
    );

    Ok(BmiResult {
        bmi,
        category: categorize(bmi),
        ideal_weight_min,
        ideal_weight_max,
    })
}

fn checked_height(feet: u8, inches: u8) -> Result<f64> {
    let height_m = height_in_meters(feet, inches);
    if height_m <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "height must be greater than zero (got {}ft {}in)",
            feet, inches
        )));
    }
    Ok(height_m)
}

fn check_weight(weight_kg: f64) -> Result<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "weight must be a positive number (got {})",
            weight_kg
        )));
    }
    Ok(())
}

impl Measurement {
    /// Run the formula on this measurement
    pub fn calculate(&self) -> Result<BmiResult> {
        calculate(self.weight_kg, self.feet, self.inches)
    }
}

impl NewEntry {
    /// Prepare a history entry for a measurement, recomputing its BMI
    pub fn from_measurement(measurement: &Measurement) -> Result<Self> {
        let result = measurement.calculate()?;
        Ok(NewEntry {
            weight: measurement.weight_kg,
            height_feet: measurement.feet,
            height_inches: measurement.inches,
            bmi: result.bmi,
            category: result.category,
        })
    }
}

impl HistoryEntry {
    /// Whether the stored bmi and category match the stored weight/height
    pub fn is_consistent(&self) -> bool {
        match compute_bmi(self.weight, self.height_feet, self.height_inches) {
            Ok(bmi) => (bmi - self.bmi).abs() < 1e-6 && categorize(bmi) == self.category,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use chrono::Utc;

    #[test]
    fn test_height_conversion() {
        let h = height_in_meters(5, 8);
        assert!((h - 1.7272).abs() < 1e-9);
        assert!((height_in_meters(6, 0) - 1.8288).abs() < 1e-9);
        assert_eq!(height_in_meters(0, 0), 0.0);
    }

    #[test]
    fn test_reference_example() {
        let result = calculate(70.0, 5, 8).unwrap();
        assert!((result.bmi - 23.46).abs() < 0.01);
        assert_eq!(result.category, Category::Normal);
        assert!((result.ideal_weight_min - 55.19).abs() < 0.01);
        // 1.7272 m squared is 2.98322; 24.9 * 2.98322 = 74.28
        assert!((result.ideal_weight_max - 74.28).abs() < 0.01);
    }

    #[test]
    fn test_formula_matches_definition() {
        for (w, f, i) in [(20.0, 1, 0), (55.5, 4, 11), (120.0, 6, 3), (300.0, 8, 11)] {
            let expected = w / ((f as f64 * 12.0 + i as f64) * 0.0254).powi(2);
            let bmi = compute_bmi(w, f, i).unwrap();
            assert!((bmi - expected).abs() < 1e-9, "{} {} {}", w, f, i);
        }
    }

    #[test]
    fn test_zero_height_is_invalid() {
        let err = calculate(70.0, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(ideal_weight_range(0, 0).is_err());
    }

    #[test]
    fn test_bad_weight_is_invalid() {
        assert!(matches!(compute_bmi(0.0, 5, 8), Err(Error::InvalidInput(_))));
        assert!(matches!(compute_bmi(-3.0, 5, 8), Err(Error::InvalidInput(_))));
        assert!(matches!(compute_bmi(f64::NAN, 5, 8), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_inches_only_height_is_allowed() {
        // feet=0 is rejected by validation, not by the formula
        assert!(compute_bmi(20.0, 0, 11).is_ok());
    }

    #[test]
    fn test_new_entry_consistency() {
        let measurement = Measurement {
            weight_kg: 92.0,
            feet: 5,
            inches: 10,
        };
        let new_entry = NewEntry::from_measurement(&measurement).unwrap();
        assert_eq!(new_entry.category(), Category::Overweight);

        let entry = new_entry.into_entry("abc".into(), Utc::now());
        assert!(entry.is_consistent());

        let mut tampered = entry.clone();
        tampered.bmi = 18.0;
        assert!(!tampered.is_consistent());

        let mut relabelled = entry;
        relabelled.category = Category::Normal;
        assert!(!relabelled.is_consistent());
    }
}
