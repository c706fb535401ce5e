//! Virtual-time timer queue
//!
//! Timers are keyed to a virtual clock that only moves when
//! [`Scheduler::advance`] is called. Tests advance it directly; the live
//! loop advances it by the wall-clock time elapsed between ticks.
//!
//! ```text
//!   schedule_once(2s, Scan)      ──▶ fires once at now+2s
//!   schedule_every(15s, Rotate)  ──▶ fires at now+15s, now+30s, ...
//!   cancel(handle)               ──▶ never fires again
//! ```

use std::time::Duration;
use thiserror::Error;

/// Identifies a scheduled timer for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Errors raised when scheduling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Periodic interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Debug, Clone, Copy)]
enum TimerKind {
    Once,
    Every(Duration),
}

#[derive(Debug)]
struct TimerEntry<T> {
    handle: TimerHandle,
    due: Duration,
    kind: TimerKind,
    task: T,
}

/// Deterministic scheduler of one-shot and periodic tasks
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    timers: Vec<TimerEntry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still pending
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Fire `task` once after `delay`
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TimerHandle {
        self.insert(self.now.saturating_add(delay), TimerKind::Once, task)
    }

    /// Fire `task` every `interval`, first at `now + interval`
    pub fn schedule_every(&mut self, interval: Duration, task: T) -> Result<TimerHandle, ScheduleError> {
        if interval.is_zero() {
            return Err(ScheduleError::ZeroInterval);
        }
        Ok(self.insert(
            self.now.saturating_add(interval),
            TimerKind::Every(interval),
            task,
        ))
    }

    /// Remove a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Move the clock forward by `elapsed`, returning every task that came
    /// due in due-time order. Ties fire in scheduling order. The clock
    /// saturates at `Duration::MAX`; a periodic timer whose next due time
    /// would pass it is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        let target = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();

        while let Some(pos) = self.next_due(target) {
            let entry = &mut self.timers[pos];
            self.now = entry.due;
            fired.push(entry.task.clone());

            let next = match entry.kind {
                TimerKind::Every(interval) => entry.due.checked_add(interval),
                TimerKind::Once => None,
            };
            match next {
                Some(due) => entry.due = due,
                None => {
                    self.timers.remove(pos);
                }
            }
        }

        self.now = target;
        fired
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.handle.0))
            .map(|(pos, _)| pos)
    }

    fn insert(&mut self, due: Duration, kind: TimerKind, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(TimerEntry {
            handle,
            due,
            kind,
            task,
        });
        handle
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
