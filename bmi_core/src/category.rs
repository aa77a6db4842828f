//! BMI categorization and the WHO reference table.

use crate::{Category, Severity};
use once_cell::sync::Lazy;

/// Lower bound of each category above Underweight, in ascending order
const THRESHOLDS: [(f64, Category); 5] = [
    (18.5, Category::Normal),
    (25.0, Category::Overweight),
    (30.0, Category::ObeseClassI),
    (35.0, Category::ObeseClassII),
    (40.0, Category::ObeseClassIII),
];

/// Gauge scale bounds; BMI outside this range pins to an end
pub const GAUGE_MIN: f64 = 10.0;
pub const GAUGE_MAX: f64 = 50.0;

/// Map a BMI score to its category
///
/// Intervals are half-open: a value on a boundary belongs to the higher
/// category (25.0 is Overweight). NaN falls through to Underweight.
pub fn categorize(bmi: f64) -> Category {
    THRESHOLDS
        .iter()
        .rev()
        .find(|(lower, _)| bmi >= *lower)
        .map(|(_, category)| *category)
        .unwrap_or(Category::Underweight)
}

/// Collapse any "Obese ..." label to "Obese", leaving others untouched
///
/// Works on free-form labels (e.g. ones read back from storage) and is
/// idempotent.
pub fn simple_category_label(label: &str) -> &str {
    if label.starts_with("Obese") {
        "Obese"
    } else {
        label
    }
}

/// Pointer position on the gauge, as a percentage from 0 to 100
pub fn gauge_position(bmi: f64) -> f64 {
    let clamped = bmi.clamp(GAUGE_MIN, GAUGE_MAX);
    (clamped - GAUGE_MIN) / (GAUGE_MAX - GAUGE_MIN) * 100.0
}

/// One row of the WHO adult classification table
#[derive(Clone, Debug)]
pub struct ClassificationRow {
    pub label: &'static str,
    pub range: &'static str,
    pub risk: Severity,
    /// Category the row falls under in the six-band scheme
    pub category: Category,
}

static CLASSIFICATION_TABLE: Lazy<Vec<ClassificationRow>> = Lazy::new(|| {
    vec![
        ClassificationRow {
            label: "Severe Thinness",
            range: "< 16",
            risk: Severity::High,
            category: Category::Underweight,
        },
        ClassificationRow {
            label: "Moderate Thinness",
            range: "16 - 16.9",
            risk: Severity::Increased,
            category: Category::Underweight,
        },
        ClassificationRow {
            label: "Mild Thinness",
            range: "17 - 18.4",
            risk: Severity::Low,
            category: Category::Underweight,
        },
        ClassificationRow {
            label: "Normal",
            range: "18.5 - 24.9",
            risk: Severity::Low,
            category: Category::Normal,
        },
        ClassificationRow {
            label: "Overweight",
            range: "25 - 29.9",
            risk: Severity::Increased,
            category: Category::Overweight,
        },
        ClassificationRow {
            label: "Obese Class I",
            range: "30 - 34.9",
            risk: Severity::High,
            category: Category::ObeseClassI,
        },
        ClassificationRow {
            label: "Obese Class II",
            range: "35 - 39.9",
            risk: Severity::VeryHigh,
            category: Category::ObeseClassII,
        },
        ClassificationRow {
            label: "Obese Class III",
            range: "40+",
            risk: Severity::Extreme,
            category: Category::ObeseClassIII,
        },
    ]
});

/// The WHO classification table, thinness split into three grades
pub fn classification_table() -> &'static [ClassificationRow] {
    &CLASSIFICATION_TABLE
}
