//! Field Devices
//!
//! Known sensors, simulated discovery and the persisted paired sensor.
//! No radio communication happens here.

mod pairing;
mod registry;

pub use pairing::{pair, paired, DeviceError, PAIRED_SENSOR_KEY};
pub use registry::{Device, DeviceRegistry, DeviceStatus, ScanProfile, DEFAULT_SCAN_DELAY};
