//! Guest dataset loader
//!
//! Reads the dining room's guest file (`{"diners": [...]}`) into a
//! [`Dataset`]. Any failure is reported as one `DataLoadError`; there is no
//! partial load.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::DataLoadError;
use crate::types::Dataset;

/// Load the dataset from a JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let dataset = parse_dataset(&content)?;
    log::info!(
        "Loaded {} guests from {}",
        dataset.diners.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a dataset from JSON text.
pub fn parse_dataset(content: &str) -> Result<Dataset, DataLoadError> {
    Ok(serde_json::from_str(content)?)
}

/// Check a service date is a real `YYYY-MM-DD` date.
///
/// Returns the date unchanged so it can be compared against reservation
/// dates as a plain string.
pub fn validate_date(date: &str) -> Result<&str, DataLoadError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DataLoadError::InvalidDate(date.to_string()))?;
    // chrono accepts "2024-5-1"; reservation dates are zero-padded
    if date.len() != 10 {
        return Err(DataLoadError::InvalidDate(date.to_string()));
    }
    Ok(date)
}
