//! Dashboard error types

use crate::activity::ActivityError;
use crate::devices::DeviceError;
use crate::schedule::ScheduleError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors surfaced by dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No rule with this id exists in the catalog
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl DashboardError {
    /// Whether the error came from bad user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DashboardError::UnknownAction(_)
                | DashboardError::Activity(ActivityError::EmptyAction)
                | DashboardError::Activity(ActivityError::EmptyTimestamp)
                | DashboardError::Device(DeviceError::EmptyName)
                | DashboardError::Storage(StorageError::InvalidKey(_))
        )
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
