//! Paired sensor persistence

use crate::storage::{KeyValueStore, StorageError};
use thiserror::Error;

/// Storage key for the last paired device name
pub const PAIRED_SENSOR_KEY: &str = "pairedSensor";

/// Errors raised while pairing
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device name must not be empty")]
    EmptyName,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Remember `name` as the paired sensor
pub fn pair<S: KeyValueStore + ?Sized>(store: &mut S, name: &str) -> Result<(), DeviceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DeviceError::EmptyName);
    }

    store.set(PAIRED_SENSOR_KEY, name)?;
    tracing::info!(sensor = %name, "Paired sensor");
    Ok(())
}

/// The paired sensor, if any. Unreadable state reads as unpaired.
pub fn paired<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    match store.get(PAIRED_SENSOR_KEY) {
        Ok(name) => name.filter(|n| !n.is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read paired sensor");
            None
        }
    }
}
