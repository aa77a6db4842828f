//! Summary statistics and chart series over the history.
//!
//! Everything here is derived on demand from an in-memory slice and never
//! persisted.

use crate::{HistoryEntry, SimpleCategory};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate view of the saved history
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HistoryStats {
    pub count: usize,
    pub average_bmi: f64,
    pub min_bmi: f64,
    pub max_bmi: f64,
    pub latest: HistoryEntry,
    pub oldest: HistoryEntry,
    /// latest.bmi - oldest.bmi, zero with fewer than two entries
    pub change: f64,
}

impl HistoryStats {
    /// Compute statistics, or `None` for an empty history
    pub fn from_entries(entries: &[HistoryEntry]) -> Option<Self> {
        let first = entries.first()?;

        let mut sum = 0.0;
        let mut min_bmi = f64::INFINITY;
        let mut max_bmi = f64::NEG_INFINITY;
        let mut latest = first;
        let mut oldest = first;

        for entry in entries {
            sum += entry.bmi;
            min_bmi = min_bmi.min(entry.bmi);
            max_bmi = max_bmi.max(entry.bmi);
            if entry.timestamp > latest.timestamp {
                latest = entry;
            }
            if entry.timestamp < oldest.timestamp {
                oldest = entry;
            }
        }

        let change = if entries.len() >= 2 {
            latest.bmi - oldest.bmi
        } else {
            0.0
        };

        Some(HistoryStats {
            count: entries.len(),
            average_bmi: sum / entries.len() as f64,
            min_bmi,
            max_bmi,
            latest: latest.clone(),
            oldest: oldest.clone(),
            change,
        })
    }
}

/// One point of the BMI-over-time chart
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    /// BMI rounded to one decimal place
    pub bmi: f64,
    pub weight: f64,
    pub category: SimpleCategory,
}

/// History as chart points, oldest first
pub fn chart_series(entries: &[HistoryEntry]) -> Vec<ChartPoint> {
    let mut sorted: Vec<&HistoryEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    sorted
        .into_iter()
        .map(|e| ChartPoint {
            timestamp: e.timestamp,
            bmi: (e.bmi * 10.0).round() / 10.0,
            weight: e.weight,
            category: e.simple_category(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::categorize;
    use chrono::{Duration, TimeZone};

    fn entry(id: &str, days: i64, bmi: f64) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(days),
            weight: 70.0,
            height_feet: 5,
            height_inches: 8,
            bmi,
            category: categorize(bmi),
        }
    }

    #[test]
    fn test_empty_history_has_no_stats() {
        assert!(HistoryStats::from_entries(&[]).is_none());
    }

    #[test]
    fn test_single_entry_has_zero_change() {
        let stats = HistoryStats::from_entries(&[entry("a", 0, 24.0)]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.change, 0.0);
        assert_eq!(stats.average_bmi, 24.0);
        assert_eq!(stats.latest.id, "a");
        assert_eq!(stats.oldest.id, "a");
    }

    #[test]
    fn test_stats_over_unordered_entries() {
        // Newest-first storage order, but the middle entry is out of place
        let entries = vec![
            entry("mid", 5, 26.0),
            entry("new", 10, 24.0),
            entry("old", 0, 28.0),
        ];
        let stats = HistoryStats::from_entries(&entries).unwrap();

        assert_eq!(stats.count, 3);
        assert!((stats.average_bmi - 26.0).abs() < 1e-9);
        assert_eq!(stats.min_bmi, 24.0);
        assert_eq!(stats.max_bmi, 28.0);
        assert_eq!(stats.latest.id, "new");
        assert_eq!(stats.oldest.id, "old");
        assert!((stats.change - -4.0).abs() < 1e-9);
    }

    #[test]
    fn test_chart_series_is_chronological_and_rounded() {
        let entries = vec![entry("b", 3, 31.26), entry("a", 1, 23.44)];
        let series = chart_series(&entries);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bmi, 23.4);
        assert_eq!(series[0].category, SimpleCategory::Normal);
        assert_eq!(series[1].bmi, 31.3);
        assert_eq!(series[1].category, SimpleCategory::Obese);
        assert!(series[0].timestamp < series[1].timestamp);
    }
}
