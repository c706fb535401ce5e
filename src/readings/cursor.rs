//! Rotating "current reading" cursor

use crate::readings::types::SensorReading;

/// Selects one reading at a time from an ordered sequence, wrapping around
#[derive(Debug, Clone, Default)]
pub struct ReadingCursor {
    readings: Vec<SensorReading>,
    index: usize,
}

impl ReadingCursor {
    pub fn new(readings: Vec<SensorReading>) -> Self {
        Self { readings, index: 0 }
    }

    /// Reading under the cursor, `None` when the sequence is empty
    pub fn current(&self) -> Option<&SensorReading> {
        self.readings.get(self.index)
    }

    /// Move to the next reading, wrapping to the start
    pub fn advance(&mut self) -> Option<&SensorReading> {
        if !self.readings.is_empty() {
            self.index = (self.index + 1) % self.readings.len();
        }
        self.current()
    }

    /// Position the cursor at `index`, taken modulo the sequence length
    pub fn seek(&mut self, index: usize) -> Option<&SensorReading> {
        if !self.readings.is_empty() {
            self.index = index % self.readings.len();
        }
        self.current()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::source::fallback_readings;

    #[test]
    fn test_advance_wraps() {
        let mut cursor = ReadingCursor::new(fallback_readings());
        assert_eq!(cursor.current().unwrap().moisture, 42.0);
        assert_eq!(cursor.advance().unwrap().moisture, 28.0);
        assert_eq!(cursor.advance().unwrap().moisture, 35.0);
        assert_eq!(cursor.advance().unwrap().moisture, 42.0);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_seek_modulo() {
        let mut cursor = ReadingCursor::new(fallback_readings());
        cursor.seek(7);
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn test_empty_sequence() {
        let mut cursor = ReadingCursor::default();
        assert!(cursor.current().is_none());
        assert!(cursor.advance().is_none());
        assert!(cursor.seek(3).is_none());
        assert_eq!(cursor.index(), 0);
        assert!(cursor.is_empty());
    }
}
