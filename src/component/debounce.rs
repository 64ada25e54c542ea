//! Debouncer: deadline tracking for trailing-edge debounced work.
//!
//! The widget owns the clock: it calls [`Debouncer::schedule`] on every edit
//! and [`Debouncer::poll`] when it wants to know whether the quiet period has
//! elapsed. Rescheduling before the deadline pushes it out (last write wins),
//! so only the final value in a burst is acted on.

use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debounce state for one field.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet period. Takes effect on the next `schedule`.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Arm (or re-arm) the deadline at `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the armed deadline has passed. Consumes the deadline, so a
    /// burst of edits yields exactly one firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
