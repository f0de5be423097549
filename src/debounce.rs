//! Accumulate-latest-then-fire debouncing.
//!
//! The photo preview follows the photo URL field, but only once typing has
//! paused: every new value replaces the pending one and restarts the timer.
//! There is no queue, only the most recent value is ever delivered.
//!
//! Time is passed in by the caller, so the same sequence of `push`/`poll`
//! calls always produces the same result.

use std::time::{Duration, Instant};

/// Default settle delay for the photo preview.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(750);

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// A value that only settles after `delay` has passed without a new push.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    settled: T,
    pending: Option<Pending<T>>,
    delay: Duration,
}

impl<T> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the timer from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Settle the pending value if its deadline has passed, then return the
    /// settled value.
    pub fn poll(&mut self, now: Instant) -> &T {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.fire();
        }
        &self.settled
    }

    /// Settle the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> &T {
        self.fire();
        &self.settled
    }

    /// Drop the pending value. The settled value is unchanged.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// The last settled value, without polling.
    pub fn settled(&self) -> &T {
        &self.settled
    }

    /// The most recently pushed value, settled or not.
    pub fn latest(&self) -> &T {
        self.pending.as_ref().map_or(&self.settled, |p| &p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn fire(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.settled = pending.value;
        }
    }
}

impl<T: Default> Default for Debounced<T> {
    fn default() -> Self {
        Self::new(T::default(), DEFAULT_DELAY)
    }
}
