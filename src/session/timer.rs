use std::time::{Duration, Instant};

/// A transition scheduled to happen later.
///
/// Holds at most one pending value. Taking it is destructive, so a
/// transition fires at most once no matter how often it is polled, and a
/// cancelled transition never fires. The payload should describe the change
/// to make, not a copy of the state it applies to.
#[derive(Clone, Debug)]
pub struct Deferred<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces anything already pending.
    pub fn schedule(&mut self, now: Instant, delay: Duration, value: T) {
        self.pending = Some((now + delay, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.due_at().is_some_and(|due| due <= now)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.is_due(now) {
            self.cancel()
        } else {
            None
        }
    }

    /// Fires early, ignoring the deadline.
    pub fn fire_now(&mut self) -> Option<T> {
        self.cancel()
    }
}
