//! Log entry type

use chrono::Local;
use serde::{Deserialize, Serialize};

/// One recorded user action
///
/// Entries are immutable once written; they leave the log only through
/// truncation or a clear-all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    /// Human-readable description, e.g. "Irrigate field - Light spray for 15 minutes"
    pub action: String,
    /// When the action was confirmed, as displayed to the user
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(action: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            timestamp: timestamp.into(),
        }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.action)
    }
}

/// Local wall-clock timestamp in the format used for new entries
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
