//! Task Scheduling
//!
//! Replaces ad-hoc interval and timeout callbacks with an explicit timer
//! queue whose handles can be cancelled.

mod timer;

pub use timer::{ScheduleError, Scheduler, TimerHandle};
