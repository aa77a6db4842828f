//! Core domain types for the BMI tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Validated measurements (weight and imperial height)
//! - BMI categories and their collapsed "simple" form
//! - The ephemeral calculation result
//! - Durable history entries and the input used to create them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Measurement
// ============================================================================

/// A validated weight/height pair
///
/// Only obtainable through [`crate::validation`], so every instance is
/// within the accepted ranges (20-300 kg, 1-8 ft, 0-11 in).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub(crate) weight_kg: f64,
    pub(crate) feet: u8,
    pub(crate) inches: u8,
}

impl Measurement {
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn feet(&self) -> u8 {
        self.feet
    }

    pub fn inches(&self) -> u8 {
        self.inches
    }
}

// ============================================================================
// Categories
// ============================================================================

/// BMI category, ordered from lowest to highest BMI band
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Underweight,
    Normal,
    Overweight,
    #[serde(rename = "Obese Class I")]
    ObeseClassI,
    #[serde(rename = "Obese Class II")]
    ObeseClassII,
    #[serde(rename = "Obese Class III")]
    ObeseClassIII,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Underweight,
        Category::Normal,
        Category::Overweight,
        Category::ObeseClassI,
        Category::ObeseClassII,
        Category::ObeseClassIII,
    ];

    /// Human-readable label, also used as the persisted form
    pub fn label(&self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::Normal => "Normal",
            Category::Overweight => "Overweight",
            Category::ObeseClassI => "Obese Class I",
            Category::ObeseClassII => "Obese Class II",
            Category::ObeseClassIII => "Obese Class III",
        }
    }

    /// Parse a label produced by [`Category::label`]
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Collapse the three obesity classes into one
    pub fn simple(&self) -> SimpleCategory {
        match self {
            Category::Underweight => SimpleCategory::Underweight,
            Category::Normal => SimpleCategory::Normal,
            Category::Overweight => SimpleCategory::Overweight,
            Category::ObeseClassI | Category::ObeseClassII | Category::ObeseClassIII => {
                SimpleCategory::Obese
            }
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Category::Normal => Severity::Low,
            Category::Underweight | Category::Overweight => Severity::Increased,
            Category::ObeseClassI => Severity::High,
            Category::ObeseClassII => Severity::VeryHigh,
            Category::ObeseClassIII => Severity::Extreme,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display/aggregation category with a single obesity bucket
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SimpleCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl SimpleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SimpleCategory::Underweight => "Underweight",
            SimpleCategory::Normal => "Normal",
            SimpleCategory::Overweight => "Overweight",
            SimpleCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for SimpleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Health-risk tier attached to each category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Increased,
    High,
    VeryHigh,
    Extreme,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Increased => "Increased",
            Severity::High => "High",
            Severity::VeryHigh => "Very High",
            Severity::Extreme => "Extremely High",
        }
    }
}

// ============================================================================
// Calculation result and history
// ============================================================================

/// Outcome of one calculation. Never persisted on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: Category,
    pub ideal_weight_min: f64,
    pub ideal_weight_max: f64,
}

/// A saved calculation, as held in the history store
///
/// Serialized with the camelCase keys of the persisted layout; the
/// timestamp is stored under `date`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "date", alias = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub weight: f64,
    pub height_feet: u8,
    pub height_inches: u8,
    pub bmi: f64,
    pub category: Category,
}

impl HistoryEntry {
    pub fn simple_category(&self) -> SimpleCategory {
        self.category.simple()
    }
}

/// A history entry before the store assigns its id and timestamp
///
/// Built from a [`Measurement`] so the stored bmi and category always
/// agree with the stored weight and height.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEntry {
    pub(crate) weight: f64,
    pub(crate) height_feet: u8,
    pub(crate) height_inches: u8,
    pub(crate) bmi: f64,
    pub(crate) category: Category,
}

impl NewEntry {
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub(crate) fn into_entry(self, id: String, timestamp: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            id,
            timestamp,
            weight: self.weight,
            height_feet: self.height_feet,
            height_inches: self.height_inches,
            bmi: self.bmi,
            category: self.category,
        }
    }
}
