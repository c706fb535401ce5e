//! Sensor reading type

use serde::{Deserialize, Serialize};

/// One snapshot of field conditions
///
/// Field names follow the `farm-data.json` layout (`pestRisk` in camelCase).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// When the reading was taken (ISO 8601 in bundled data)
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Name of the reporting sensor
    #[serde(default)]
    pub sensor: Option<String>,
    /// Soil moisture, percent
    pub moisture: f64,
    /// Nutrient index
    pub nutrients: f64,
    /// Air temperature, °C
    pub temperature: f64,
    /// Whether pest activity is likely
    #[serde(alias = "pest_risk")]
    pub pest_risk: bool,
}

impl SensorReading {
    pub fn new(moisture: f64, nutrients: f64, temperature: f64, pest_risk: bool) -> Self {
        Self {
            timestamp: None,
            sensor: None,
            moisture,
            nutrients,
            temperature,
            pest_risk,
        }
    }

    /// Builder method: set timestamp
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Builder method: set sensor name
    pub fn sensor(mut self, sensor: impl Into<String>) -> Self {
        self.sensor = Some(sensor.into());
        self
    }
}

impl std::fmt::Display for SensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "moisture {}% | nutrients {} | temperature {}°C | pest risk {}",
            self.moisture,
            self.nutrients,
            self.temperature,
            if self.pest_risk { "yes" } else { "no" }
        )
    }
}
