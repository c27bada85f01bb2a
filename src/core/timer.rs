use std::fmt::Debug;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// A callback scheduled to fire once after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer<A> {
    pub action: A,
    pub delay: Duration,
    pub deadline: Instant,
}

/// Slot holding at most one outstanding [`Timer`].
///
/// Scheduling into an occupied slot cancels the previous timer, so a stale
/// callback can never be delivered alongside the new one.
#[derive(Debug)]
pub struct TimerSlot<A> {
    pending: Option<Timer<A>>,
}

impl<A: Copy + Debug> TimerSlot<A> {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    pub fn schedule(&mut self, delay: Duration, action: A) {
        let timer = Timer {
            action,
            delay,
            deadline: Instant::now() + delay,
        };

        if let Some(previous) = self.pending.replace(timer) {
            trace!("Replaced pending {:?} timer", previous.action);
        }
    }

    /// Cancels the pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Removes the pending timer, returning its action so it can be run.
    pub fn take(&mut self) -> Option<A> {
        self.pending.take().map(|timer| timer.action)
    }

    pub fn get(&self) -> Option<&Timer<A>> {
        self.pending.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|timer| timer.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<A: Copy + Debug> Default for TimerSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}
