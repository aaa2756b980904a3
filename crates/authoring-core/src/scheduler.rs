//! Time and timer capabilities.
//!
//! The engine never reads a wall clock. Hosts pass the current [`Timestamp`] into every call, and
//! the diagnostic debounce is driven through an injected [`Scheduler`]. [`ManualScheduler`] is a
//! simulated-time implementation used by tests and by single-threaded hosts that poll.

use std::collections::BTreeMap;
use std::ops::Add;
use std::time::Duration;

/// Milliseconds since the start of the editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The start of the session.
    pub const ZERO: Self = Self(0);

    /// A timestamp `millis` milliseconds into the session.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the start of the session.
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(millis))
    }
}

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Schedule-after / cancel capability.
///
/// When a timer fires, the host calls [`AuthoringEngine::on_timer`](crate::AuthoringEngine::on_timer)
/// with its id. Cancelling an unknown or already-fired timer is a no-op.
pub trait Scheduler {
    /// Arrange for a timer to fire `delay` after `now`.
    fn schedule_after(&mut self, delay: Duration, now: Timestamp) -> TimerId;

    /// Cancel a pending timer.
    fn cancel(&mut self, id: TimerId);
}

/// Simulated-time scheduler.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: BTreeMap<TimerId, Timestamp>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers still pending.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of a pending timer.
    pub fn deadline(&self, id: TimerId) -> Option<Timestamp> {
        self.pending.get(&id).copied()
    }

    /// Remove and return every timer due at or before `now`, earliest deadline first.
    pub fn take_due(&mut self, now: Timestamp) -> Vec<TimerId> {
        let mut due: Vec<(Timestamp, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, now: Timestamp) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, now + delay);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}
