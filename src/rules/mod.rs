//! Action recommendations
//!
//! Decides which field actions to offer for the current reading.

mod catalog;

pub use catalog::{evaluate, ActionCatalog, ActionRule, Condition, DEFAULT_RULES};
