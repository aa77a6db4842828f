#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - Domain types (measurements, categories, results, history entries)
//! - The BMI formula and categorizer
//! - Form validation
//! - History persistence, statistics and display ordering
//! - Health guidance and CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod formula;
pub mod category;
pub mod validation;
pub mod store;
pub mod stats;
pub mod sort;
pub mod advice;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use formula::calculate;
pub use category::{categorize, classification_table, simple_category_label};
pub use validation::{validate, ValidationErrors};
pub use store::{FileBackend, HistoryBackend, HistoryStore, MemoryBackend};
pub use stats::{chart_series, HistoryStats};
pub use sort::{SortDirection, SortField, SortState};
pub use advice::WeightAdjustment;
pub use export::export_csv;
