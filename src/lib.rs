//! # eFarm
//!
//! The logic behind a small farm-monitoring dashboard: a bounded, persisted
//! activity log, action recommendations evaluated against sensor readings,
//! and the timers that rotate readings and simulate device scans.
//!
//! ## Features
//!
//! - **Bounded activity log**: newest-first, capped at 50 entries, survives restarts
//! - **Action catalog**: declarative condition → action rules
//! - **Storage-agnostic**: everything persists through a [`KeyValueStore`]
//! - **Deterministic timers**: cancellable handles over a virtual clock
//! - **Export**: pretty-printed JSON log export
//!
//! ## Modules
//!
//! - [`storage`]: Key-value storage port, in-memory and JSON-file stores
//! - [`activity`]: Activity log and export
//! - [`readings`]: Sensor readings, data source loading, rotation cursor
//! - [`rules`]: Action catalog and evaluation
//! - [`schedule`]: Timer queue
//! - [`devices`]: Device registry, simulated scan, pairing
//! - [`dashboard`]: Application state owner
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use efarm::{ActivityLogStore, FileStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut log = ActivityLogStore::new(FileStore::open("./efarm_data/state.json")?);
//!
//!     log.append("Irrigate field - Light spray for 15 minutes", "2025-09-18 08:00:00")?;
//!
//!     for entry in log.list() {
//!         println!("{}", entry);
//!     }
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod config;
pub mod dashboard;
pub mod devices;
pub mod readings;
pub mod rules;
pub mod schedule;
pub mod storage;

// Re-export top-level types for convenience
pub use activity::{
    export_json, parse_export, ActivityError, ActivityLogStore, ActivityResult, LogEntry,
    EXPORT_FILE_NAME, MAX_ENTRIES,
};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use readings::{load_or_fallback, ReadingCursor, ReadingError, SensorReading};

pub use rules::{evaluate, ActionCatalog, ActionRule};

pub use schedule::{Scheduler, TimerHandle};

pub use devices::{Device, DeviceRegistry, DeviceStatus, ScanProfile};

pub use dashboard::{Dashboard, DashboardError, DashboardEvent, DashboardSettings};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig, StorageConfig};
