//! Activity log error types

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while recording or exporting activity
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The action description was empty or whitespace
    #[error("Action description must not be empty")]
    EmptyAction,

    /// The timestamp was empty or whitespace
    #[error("Timestamp must not be empty")]
    EmptyTimestamp,

    /// Writing the log back to storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Export file could not be written or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Export content is not a valid log array
    #[error("Invalid export: {0}")]
    InvalidExport(String),
}

/// Result type alias for activity operations
pub type ActivityResult<T> = Result<T, ActivityError>;
