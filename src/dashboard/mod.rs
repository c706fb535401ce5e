//! Dashboard
//!
//! The single owner of application state. See [`Dashboard`].
//!
//! # Example
//!
//! ```rust
//! use efarm::dashboard::Dashboard;
//! use efarm::readings::fallback_readings;
//! use efarm::storage::MemoryStore;
//!
//! let mut dash = Dashboard::new(MemoryStore::new(), fallback_readings());
//! let offered: Vec<_> = dash.recommended_actions().iter().map(|r| r.id).collect();
//! assert_eq!(offered, ["skip-water", "pest-check"]);
//!
//! dash.perform_action("pest-check").unwrap();
//! assert_eq!(dash.logs()[0].action, "Pest inspection - Check leaves and stems");
//! ```

pub mod cards;
mod controller;
mod error;

pub use controller::{
    Dashboard, DashboardEvent, DashboardSettings, DashboardTask, DEFAULT_ROTATION_INTERVAL,
};
pub use error::{DashboardError, DashboardResult};
