//! Dashboard controller
//!
//! Owns all application state that the front end touches: the activity
//! log, the action catalog, the reading cursor, known devices and the timer
//! queue. Front ends call methods here instead of sharing globals.
//!
//! ```text
//!   tick(elapsed) ─▶ Scheduler::advance ─▶ RotateReading ─▶ cursor.advance()
//!                                       └▶ CompleteScan  ─▶ devices.complete_scan()
//! ```

use crate::activity::{local_timestamp, write_export, ActivityLogStore, LogEntry, MAX_ENTRIES};
use crate::dashboard::cards;
use crate::dashboard::error::{DashboardError, DashboardResult};
use crate::devices::{self, Device, DeviceRegistry, ScanProfile, DEFAULT_SCAN_DELAY};
use crate::readings::{ReadingCursor, SensorReading};
use crate::rules::{ActionCatalog, ActionRule};
use crate::schedule::{Scheduler, TimerHandle};
use crate::storage::KeyValueStore;
use std::path::Path;
use std::time::Duration;

/// Default interval between reading rotations
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(15);

/// Tasks the dashboard schedules on its timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTask {
    RotateReading,
    CompleteScan,
}

/// Something that changed during a [`Dashboard::tick`]
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The cursor moved to the reading at `index`
    ReadingChanged { index: usize },
    /// A scan finished and found a new device (one event per device)
    DeviceDiscovered(Device),
    /// A scan finished without finding anything new
    ScanFinished,
}

/// Tunables for a dashboard instance
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub log_capacity: usize,
    pub rotation_interval: Duration,
    pub scan_delay: Duration,
    /// Devices a simulated scan reports
    pub discoverable: Vec<Device>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            log_capacity: MAX_ENTRIES,
            rotation_interval: DEFAULT_ROTATION_INTERVAL,
            scan_delay: DEFAULT_SCAN_DELAY,
            discoverable: ScanProfile::default().devices(),
        }
    }
}

/// Top-level application state
pub struct Dashboard<S> {
    log: ActivityLogStore<S>,
    catalog: ActionCatalog,
    cursor: ReadingCursor,
    devices: DeviceRegistry,
    scheduler: Scheduler<DashboardTask>,
    rotation: Option<TimerHandle>,
    rotation_interval: Duration,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Create a dashboard with default settings and the built-in catalog
    pub fn new(store: S, readings: Vec<SensorReading>) -> Self {
        Self::with_settings(store, readings, DashboardSettings::default())
    }

    pub fn with_settings(store: S, readings: Vec<SensorReading>, settings: DashboardSettings) -> Self {
        Self {
            log: ActivityLogStore::with_capacity(store, settings.log_capacity),
            catalog: ActionCatalog::default(),
            cursor: ReadingCursor::new(readings),
            devices: DeviceRegistry::new(settings.scan_delay).with_discoverable(settings.discoverable),
            scheduler: Scheduler::new(),
            rotation: None,
            rotation_interval: settings.rotation_interval,
        }
    }

    /// Builder method: replace the action catalog
    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    // ── Readings & recommendations ─────────────────────────────

    pub fn current_reading(&self) -> Option<&SensorReading> {
        self.cursor.current()
    }

    pub fn reading_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn reading_count(&self) -> usize {
        self.cursor.len()
    }

    /// Jump to a reading (index taken modulo the sequence length)
    pub fn select_reading(&mut self, index: usize) -> Option<&SensorReading> {
        self.cursor.seek(index)
    }

    /// Actions recommended for the current reading, in catalog order
    pub fn recommended_actions(&self) -> Vec<&ActionRule> {
        match self.cursor.current() {
            Some(reading) => self.catalog.evaluate(reading),
            None => Vec::new(),
        }
    }

    pub fn action_catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    // ── Activity log ───────────────────────────────────────────

    /// Confirm a catalog action, recording "<title> - <hint>" now
    pub fn perform_action(&mut self, action_id: &str) -> DashboardResult<LogEntry> {
        self.perform_action_at(action_id, &local_timestamp())
    }

    pub fn perform_action_at(&mut self, action_id: &str, timestamp: &str) -> DashboardResult<LogEntry> {
        let line = self
            .catalog
            .find(action_id)
            .map(ActionRule::log_line)
            .ok_or_else(|| DashboardError::UnknownAction(action_id.to_string()))?;

        let entry = self.log.append(&line, timestamp)?;
        tracing::info!(action = %action_id, "Action completed");
        Ok(entry)
    }

    /// Record a free-form note in the activity log
    pub fn record(&mut self, action: &str) -> DashboardResult<LogEntry> {
        Ok(self.log.append(action, &local_timestamp())?)
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.log.list()
    }

    pub fn clear_logs(&mut self) -> DashboardResult<()> {
        Ok(self.log.clear()?)
    }

    /// Export the full log to `path`, returning the number of entries written
    pub fn export_logs(&self, path: &Path) -> DashboardResult<usize> {
        let entries = self.log.list();
        write_export(&entries, path)?;
        Ok(entries.len())
    }

    pub fn activity_log(&self) -> &ActivityLogStore<S> {
        &self.log
    }

    // ── Devices ────────────────────────────────────────────────

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    pub fn begin_scan(&mut self) -> TimerHandle {
        self.devices
            .begin_scan(&mut self.scheduler, DashboardTask::CompleteScan)
    }

    pub fn cancel_scan(&mut self) -> bool {
        self.devices.cancel_scan(&mut self.scheduler)
    }

    pub fn pair_sensor(&mut self, name: &str) -> DashboardResult<()> {
        Ok(devices::pair(self.log.store_mut(), name)?)
    }

    pub fn paired_sensor(&self) -> Option<String> {
        devices::paired(self.log.store())
    }

    // ── Action cards ───────────────────────────────────────────

    pub fn toggle_card(&mut self, card_id: &str) -> DashboardResult<bool> {
        Ok(cards::toggle(self.log.store_mut(), card_id)?)
    }

    pub fn card_done(&self, card_id: &str) -> bool {
        cards::is_done(self.log.store(), card_id)
    }

    pub fn completed_cards<'a>(&self, card_ids: &[&'a str]) -> Vec<&'a str> {
        cards::restore(self.log.store(), card_ids)
    }

    // ── Timers ─────────────────────────────────────────────────

    /// Start rotating the current reading every rotation interval.
    /// Calling this while rotation is running keeps the existing timer.
    pub fn start_rotation(&mut self) -> DashboardResult<TimerHandle> {
        if let Some(handle) = self.rotation {
            if self.scheduler.is_pending(handle) {
                return Ok(handle);
            }
        }

        let handle = self
            .scheduler
            .schedule_every(self.rotation_interval, DashboardTask::RotateReading)?;
        self.rotation = Some(handle);
        tracing::debug!(interval_secs = self.rotation_interval.as_secs(), "Reading rotation started");
        Ok(handle)
    }

    pub fn stop_rotation(&mut self) -> bool {
        self.rotation
            .take()
            .map(|handle| self.scheduler.cancel(handle))
            .unwrap_or(false)
    }

    /// Advance time and apply every task that came due
    pub fn tick(&mut self, elapsed: Duration) -> Vec<DashboardEvent> {
        let fired = self.scheduler.advance(elapsed);
        let mut events = Vec::with_capacity(fired.len());

        for task in fired {
            match task {
                DashboardTask::RotateReading => {
                    if self.cursor.advance().is_some() {
                        events.push(DashboardEvent::ReadingChanged {
                            index: self.cursor.index(),
                        });
                    }
                }
                DashboardTask::CompleteScan => {
                    let found = self.devices.complete_scan();
                    if found.is_empty() {
                        events.push(DashboardEvent::ScanFinished);
                    }
                    events.extend(found.into_iter().map(DashboardEvent::DeviceDiscovered));
                }
            }
        }

        events
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }
}
