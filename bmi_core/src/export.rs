//! CSV export of the saved history.

use crate::{HistoryEntry, Result};
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    date: String,
    weight: f64,
    height_feet: u8,
    height_inches: u8,
    bmi: String,
    category: &'static str,
}

impl From<&HistoryEntry> for CsvRow {
    fn from(entry: &HistoryEntry) -> Self {
        CsvRow {
            id: entry.id.clone(),
            date: entry.timestamp.to_rfc3339(),
            weight: entry.weight,
            height_feet: entry.height_feet,
            height_inches: entry.height_inches,
            bmi: format!("{:.2}", entry.bmi),
            category: entry.category.label(),
        }
    }
}

/// Write entries to a CSV file, replacing any existing file
///
/// Rows keep the order of `entries`. The file is synced before returning.
/// Returns the number of rows written.
pub fn export_csv(entries: &[HistoryEntry], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(&file);

    // Header is written explicitly so an empty export still has one
    writer.write_record([
        "id",
        "date",
        "weight",
        "height_feet",
        "height_inches",
        "bmi",
        "category",
    ])?;
    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    drop(writer);
    file.sync_all()?;

    tracing::info!("Exported {} history entries to {:?}", entries.len(), path);
    Ok(entries.len())
}
