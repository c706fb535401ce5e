//! eFarm Storage Layer
//!
//! This module provides the persistence port used by the rest of the crate:
//!
//! - **kv**: the [`KeyValueStore`] trait and an in-memory implementation
//! - **file**: a JSON-file implementation that survives restarts
//! - **error**: Error types
//!
//! # Persisted keys
//!
//! ```text
//!   eFarmLogs       → JSON array of {action, timestamp}, newest first
//!   done_<cardId>   → "1" | "0"
//!   pairedSensor    → device name
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use efarm::storage::{FileStore, KeyValueStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = FileStore::open("./efarm_data/state.json")?;
//!     store.set("pairedSensor", "SoilProbe-23")?;
//!     assert_eq!(store.get("pairedSensor")?.as_deref(), Some("SoilProbe-23"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file;
pub mod kv;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
