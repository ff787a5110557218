//! Trailing-edge debounce with explicit cancel-on-reschedule.
//!
//! The debouncer does not own a clock. Each [`Debouncer::push`] hands back a
//! [`Reschedule`] telling the host which timer to cancel and which to start;
//! when a timer fires, [`Debouncer::settle`] returns the latest value only if
//! that timer is still the current one.

use super::timers::TimerId;

/// Timer work the host must perform after a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reschedule {
    /// Previously pending timer, now superseded.
    pub cancel: Option<TimerId>,
    pub schedule: TimerId,
    pub delay_ms: u32,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    wait_ms: u32,
    pending: Option<(TimerId, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    /// Record `value` as the latest sample and restart the window.
    ///
    /// `arm` allocates the id of the replacement timer.
    pub fn push(&mut self, value: T, arm: impl FnOnce() -> TimerId) -> Reschedule {
        let cancel = self.pending.take().map(|(id, _)| id);
        let schedule = arm();
        self.pending = Some((schedule, value));
        Reschedule {
            cancel,
            schedule,
            delay_ms: self.wait_ms,
        }
    }

    /// Trailing edge. Returns the latest value when `id` is the live timer.
    pub fn settle(&mut self, id: TimerId) -> Option<T> {
        match self.pending.take() {
            Some((pending, value)) if pending == id => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }
}
