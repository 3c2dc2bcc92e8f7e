//! Timer Queue - Virtual time for page behaviours
//!
//! The page never sleeps. Timers are entries in a queue ordered by due time;
//! the host advances virtual time and the due tasks are dispatched in order.
//! Timers due at the same instant fire in the order they were scheduled.
//!
//! # Pattern
//!
//! - Typed text re-arms a one-shot timer after every character
//! - The clock uses a repeating interval
//! - Unmount clears everything (there is no other cancellation)
//!
//! # Example
//!
//! ```ignore
//! let mut timers = TimerQueue::new();
//! timers.set_timeout(Duration::from_millis(500), TimerTask::TypeNextChar);
//!
//! let until = timers.now() + Duration::from_millis(16);
//! while let Some(task) = timers.pop_due(until) {
//!     // dispatch task
//! }
//! timers.advance_to(until);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

// =============================================================================
// TYPES
// =============================================================================

/// Work a timer performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerTask {
    /// Append the next character of the typed text.
    TypeNextChar,
    /// Re-render the clock.
    RefreshClock,
}

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Entry {
    id: TimerId,
    task: TimerTask,
    repeat: Option<Duration>,
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// Deterministic queue of pending timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of scheduled timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn insert(&mut self, due: Duration, entry: Entry) {
        let seq = self.next_seq();
        self.pending.insert((due, seq), entry);
    }

    /// Run `task` once after `delay`.
    pub fn set_timeout(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_seq());
        self.insert(
            self.now + delay,
            Entry {
                id,
                task,
                repeat: None,
            },
        );
        id
    }

    /// Run `task` every `period`, first after one period.
    ///
    /// A zero period is bumped to 1ms so a single `pop_due` sweep terminates.
    pub fn set_interval(&mut self, period: Duration, task: TimerTask) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        let id = TimerId(self.next_seq());
        self.insert(
            self.now + period,
            Entry {
                id,
                task,
                repeat: Some(period),
            },
        );
        id
    }

    /// Cancel a timer. Returns false if it already fired or never existed.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let key = self
            .pending
            .iter()
            .find(|(_, entry)| entry.id == id)
            .map(|(key, _)| *key);

        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    /// Cancel every timer.
    pub fn clear_all(&mut self) {
        self.pending.clear();
    }

    /// Pop the next timer due at or before `until`.
    ///
    /// Moves virtual time to the timer's due time and re-arms intervals.
    /// Timers scheduled while handling a popped task are considered by the
    /// next call, so chains of short timeouts resolve within one sweep.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerTask> {
        let (&(due, seq), _) = self.pending.iter().next()?;
        if due > until {
            return None;
        }

        let entry = self.pending.remove(&(due, seq))?;
        self.now = self.now.max(due);

        if let Some(period) = entry.repeat {
            self.insert(due + period, entry);
        }

        Some(entry.task)
    }

    /// Move virtual time forward without firing anything.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

// =============================================================================
// TESTS
// =============================================================================
