//! Device registry and simulated discovery
//!
//! Discovery is simulated: a scan schedules a one-shot completion on the
//! caller's [`Scheduler`], and completing it adds the registry's
//! discoverable devices that are not yet known. A scan in flight can be
//! cancelled.
//!
//! Which devices a scan "finds" is chosen with a [`ScanProfile`] or an
//! explicit list.

use crate::schedule::{Scheduler, TimerHandle};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before a simulated scan completes
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_millis(2000);

/// Connection state of a device
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "online"),
            DeviceStatus::Offline => write!(f, "offline"),
        }
    }
}

/// A known field device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub status: DeviceStatus,
    /// Signal strength as displayed, e.g. "-45 dBm"
    pub signal: String,
}

impl Device {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: DeviceStatus,
        signal: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
            signal: signal.into(),
        }
    }
}

fn default_devices() -> Vec<Device> {
    vec![
        Device::new("sensor-01", "Field Sensor A1", DeviceStatus::Online, "-45 dBm"),
        Device::new("sensor-02", "Weather Station", DeviceStatus::Online, "-38 dBm"),
        Device::new("sensor-03", "Soil Probe B2", DeviceStatus::Offline, "No signal"),
    ]
}

/// Preset sets of devices a simulated scan discovers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanProfile {
    /// One new field sensor next to the default registry
    #[default]
    Dashboard,
    /// Nearby field hardware: a field sensor, a soil probe and a LoRa gateway
    Field,
    /// Placeholder simulator sensors
    Simulated,
}

impl ScanProfile {
    /// Devices a scan under this profile reports
    pub fn devices(self) -> Vec<Device> {
        match self {
            ScanProfile::Dashboard => vec![Device::new(
                "sensor-04",
                "New Field Sensor C1",
                DeviceStatus::Online,
                "-52 dBm",
            )],
            ScanProfile::Field => ["Sensor-Field-01", "SoilProbe-23", "LoRa-GW-7"]
                .into_iter()
                .map(nearby)
                .collect(),
            ScanProfile::Simulated => ["SIM-Sensor-01", "SIM-Sensor-02"]
                .into_iter()
                .map(nearby)
                .collect(),
        }
    }
}

fn nearby(name: &str) -> Device {
    Device::new(name, name, DeviceStatus::Online, "~ -60 dBm")
}

/// Known devices plus the state of any scan in flight
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    discoverable: Vec<Device>,
    scan_delay: Duration,
    scan: Option<TimerHandle>,
}

impl DeviceRegistry {
    pub fn new(scan_delay: Duration) -> Self {
        Self {
            devices: default_devices(),
            discoverable: ScanProfile::default().devices(),
            scan_delay,
            scan: None,
        }
    }

    /// Builder method: replace the devices a scan discovers
    pub fn with_discoverable(mut self, devices: Vec<Device>) -> Self {
        self.discoverable = devices;
        self
    }

    pub fn discoverable(&self) -> &[Device] {
        &self.discoverable
    }

    pub fn list(&self) -> &[Device] {
        &self.devices
    }

    pub fn scan_delay(&self) -> Duration {
        self.scan_delay
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Whether a scan is waiting to complete
    pub fn is_scanning(&self) -> bool {
        self.scan.is_some()
    }

    /// Schedule scan completion as `task`. A scan already in flight is
    /// reused rather than duplicated.
    pub fn begin_scan<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, task: T) -> TimerHandle {
        if let Some(handle) = self.scan {
            if scheduler.is_pending(handle) {
                return handle;
            }
        }

        let handle = scheduler.schedule_once(self.scan_delay, task);
        self.scan = Some(handle);
        tracing::info!(delay_ms = self.scan_delay.as_millis() as u64, "Scanning for devices");
        handle
    }

    /// Abort a scan in flight. Returns false when no scan was pending.
    pub fn cancel_scan<T: Clone>(&mut self, scheduler: &mut Scheduler<T>) -> bool {
        match self.scan.take() {
            Some(handle) => {
                let cancelled = scheduler.cancel(handle);
                if cancelled {
                    tracing::info!("Device scan cancelled");
                }
                cancelled
            }
            None => false,
        }
    }

    /// Apply scan results. Returns the devices added by this scan, in
    /// discovery order; already known ids are skipped.
    pub fn complete_scan(&mut self) -> Vec<Device> {
        self.scan = None;

        let mut added = Vec::new();
        for found in &self.discoverable {
            if self.devices.iter().any(|d| d.id == found.id) {
                continue;
            }
            tracing::info!(id = %found.id, name = %found.name, "Discovered device");
            self.devices.push(found.clone());
            added.push(found.clone());
        }

        if added.is_empty() {
            tracing::debug!("Scan found no new devices");
        }
        added
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_DELAY)
    }
}
