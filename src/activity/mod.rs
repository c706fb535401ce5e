//! Activity Log
//!
//! Records confirmed user actions in a bounded, persisted history:
//!
//! - **types**: [`LogEntry`]
//! - **log**: [`ActivityLogStore`], the capped newest-first list
//! - **export**: pretty-printed JSON export and re-import
//! - **error**: Error types
//!
//! ```text
//! append:  validate → read (corrupt ⇒ empty) → push front → truncate(50) → write
//! ```

pub mod error;
pub mod export;
pub mod log;
pub mod types;

pub use error::{ActivityError, ActivityResult};
pub use export::{export_json, parse_export, write_export, EXPORT_FILE_NAME};
pub use log::{ActivityLogStore, LOG_KEY, MAX_ENTRIES};
pub use types::{local_timestamp, LogEntry};
