//! Display ordering for the history table.

use crate::{Error, HistoryEntry, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Column the history can be ordered by
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Date,
    Weight,
    Bmi,
    Category,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            "category" => Ok(SortField::Category),
            other => Err(Error::Other(format!("Unknown sort field: {}", other))),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current ordering of the history table
///
/// Starts at newest-first. Selecting the active field flips direction;
/// selecting a different field switches to it, descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    /// Sorted copy of the entries; ties keep their input order
    pub fn apply(&self, entries: &[HistoryEntry]) -> Vec<HistoryEntry> {
        sort_entries(entries, self.field, self.direction)
    }
}

/// Stable sort of a copy of `entries`
pub fn sort_entries(
    entries: &[HistoryEntry],
    field: SortField,
    direction: SortDirection,
) -> Vec<HistoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        let cmp = compare(a, b, field);
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
    sorted
}

fn compare(a: &HistoryEntry, b: &HistoryEntry, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.timestamp.cmp(&b.timestamp),
        SortField::Weight => a.weight.total_cmp(&b.weight),
        SortField::Bmi => a.bmi.total_cmp(&b.bmi),
        SortField::Category => a.category.label().cmp(b.category.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::categorize;
    use chrono::{Duration, TimeZone, Utc};

    fn entry(id: &str, days: i64, weight: f64, bmi: f64) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::days(days),
            weight,
            height_feet: 5,
            height_inches: 8,
            bmi,
            category: categorize(bmi),
        }
    }

    fn ids(entries: &[HistoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    fn sample() -> Vec<HistoryEntry> {
        vec![
            entry("a", 2, 80.0, 26.8),
            entry("b", 0, 60.0, 20.1),
            entry("c", 1, 110.0, 36.9),
            entry("d", 3, 50.0, 16.8),
        ]
    }

    #[test]
    fn test_default_is_newest_first() {
        let sorted = SortState::default().apply(&sample());
        assert_eq!(ids(&sorted), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_bmi_ascending_then_descending_is_reversed() {
        let entries = sample();
        let asc = sort_entries(&entries, SortField::Bmi, SortDirection::Ascending);
        let mut desc = sort_entries(&entries, SortField::Bmi, SortDirection::Descending);
        desc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
        assert_eq!(ids(&asc), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_weight_and_category_sort() {
        let entries = sample();
        let by_weight = sort_entries(&entries, SortField::Weight, SortDirection::Ascending);
        assert_eq!(ids(&by_weight), vec!["d", "b", "a", "c"]);

        let by_category = sort_entries(&entries, SortField::Category, SortDirection::Ascending);
        // Normal < Obese Class II < Overweight < Underweight
        assert_eq!(ids(&by_category), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let entries = vec![
            entry("x", 0, 70.0, 22.0),
            entry("y", 1, 70.0, 22.0),
            entry("z", 2, 90.0, 30.5),
        ];
        let asc = sort_entries(&entries, SortField::Weight, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec!["x", "y", "z"]);
        let desc = sort_entries(&entries, SortField::Weight, SortDirection::Descending);
        assert_eq!(ids(&desc), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_select_toggles_and_resets() {
        let mut state = SortState::default();

        state.select(SortField::Date);
        assert_eq!(state, SortState::new(SortField::Date, SortDirection::Ascending));

        state.select(SortField::Bmi);
        assert_eq!(state, SortState::new(SortField::Bmi, SortDirection::Descending));

        state.select(SortField::Bmi);
        assert_eq!(state.direction, SortDirection::Ascending);

        state.select(SortField::Weight);
        assert_eq!(state, SortState::new(SortField::Weight, SortDirection::Descending));
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("BMI".parse::<SortField>().unwrap(), SortField::Bmi);
        assert_eq!("date".parse::<SortField>().unwrap(), SortField::Date);
        assert!("height".parse::<SortField>().is_err());
    }
}
