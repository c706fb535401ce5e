//! Sensor Readings
//!
//! The dashboard's input: an ordered sequence of [`SensorReading`] loaded
//! from a file (or the built-in fallback) and a [`ReadingCursor`] that picks
//! the "current" one on each rotation tick.

mod cursor;
mod source;
mod types;

pub use cursor::ReadingCursor;
pub use source::{
    fallback_readings, load_or_fallback, load_readings, parse_csv, parse_json, ReadingError,
    ReadingResult,
};
pub use types::SensorReading;
