//! Cancellable one-shot deadlines driven by the host's frame tick.
//!
//! The engine schedules no threads and owns no clock; deferred work is
//! modelled as a [`OneShot`] deadline that the widget checks from its `tick`.
//! Rearming supersedes any pending deadline, so the newest schedule always
//! wins and a stale deadline can never fire twice.

use std::time::{Duration, Instant};

/// A cancellable, rearm-supersedes one-shot deadline.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
/// use tabstrip_core::OneShot;
///
/// let mut deferred = OneShot::new();
/// let now = Instant::now();
/// deferred.arm_after(now, Duration::from_millis(10));
/// assert!(!deferred.fire_if_due(now));
/// assert!(deferred.fire_if_due(now + Duration::from_millis(10)));
/// assert!(!deferred.is_armed());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OneShot {
    deadline: Option<Instant>,
}

impl OneShot {
    /// Creates an unarmed one-shot.
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the one-shot to fire at `at`, superseding any pending deadline.
    pub fn arm(&mut self, at: Instant) {
        self.deadline = Some(at);
    }

    /// Arms the one-shot to fire `delay` after `now`.
    pub fn arm_after(&mut self, now: Instant, delay: Duration) {
        self.arm(now + delay);
    }

    /// Cancels any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fires at most once: returns `true` and disarms when `now` has reached
    /// the pending deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
