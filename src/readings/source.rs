//! Reading data source
//!
//! Loads the ordered reading sequence from a JSON array (`farm-data.json`)
//! or a CSV file with a header row. When nothing usable can be loaded the
//! built-in fallback sequence is used instead.

use crate::readings::types::SensorReading;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading readings
#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data source contains no readings")]
    Empty,
}

/// Result type alias for reading operations
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Load readings from `path`, choosing the format by extension
pub fn load_readings(path: &Path) -> ReadingResult<Vec<SensorReading>> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let content = std::fs::read_to_string(path)?;
    let readings = if is_csv {
        parse_csv(&content)?
    } else {
        parse_json(&content)?
    };

    if readings.is_empty() {
        return Err(ReadingError::Empty);
    }
    Ok(readings)
}

/// Parse a JSON array of readings
pub fn parse_json(content: &str) -> ReadingResult<Vec<SensorReading>> {
    Ok(serde_json::from_str(content)?)
}

/// Parse CSV with a header row naming the reading fields
pub fn parse_csv(content: &str) -> ReadingResult<Vec<SensorReading>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut readings = Vec::new();
    for record in reader.deserialize() {
        readings.push(record?);
    }
    Ok(readings)
}

/// Load readings, substituting [`fallback_readings`] on any failure
pub fn load_or_fallback(path: Option<&Path>) -> Vec<SensorReading> {
    let Some(path) = path else {
        tracing::info!("No reading data file configured, using fallback data");
        return fallback_readings();
    };

    match load_readings(path) {
        Ok(readings) => {
            tracing::info!(path = ?path, count = readings.len(), "Loaded sensor readings");
            readings
        }
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "Could not load reading data, using fallback data");
            fallback_readings()
        }
    }
}

/// Built-in sample sequence
pub fn fallback_readings() -> Vec<SensorReading> {
    vec![
        SensorReading::new(42.0, 4.0, 24.0, true)
            .timestamp("2025-09-18T08:00:00Z")
            .sensor("Sensor-Field-01"),
        SensorReading::new(28.0, 2.0, 28.0, false)
            .timestamp("2025-09-18T12:00:00Z")
            .sensor("Sensor-Field-01"),
        SensorReading::new(35.0, 3.0, 26.0, false)
            .timestamp("2025-09-18T16:00:00Z")
            .sensor("Sensor-Field-01"),
    ]
}
