//! Cancelable fire-once timers.
//!
//! Timers are deadlines, not threads: the host calls the owner's `tick`
//! from its event loop and due timers fire there. Scheduling again
//! replaces the pending deadline, and a cancelled timer never fires.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// A single pending deadline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeferredTimer {
    deadline: Option<Instant>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer for `now + delay`, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm. Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has passed without firing the timer.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }

    /// Fire if due. A fired timer is disarmed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let clock = ManualClock::new();
        let mut timer = DeferredTimer::new();
        timer.schedule(clock.now(), Duration::from_millis(100));

        clock.advance(Duration::from_millis(99));
        assert!(!timer.fire_if_due(clock.now()));

        clock.advance(Duration::from_millis(1));
        assert!(timer.fire_if_due(clock.now()));
        assert!(!timer.fire_if_due(clock.now()));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let clock = ManualClock::new();
        let mut timer = DeferredTimer::new();
        timer.schedule(clock.now(), Duration::from_millis(100));

        clock.advance(Duration::from_millis(80));
        timer.schedule(clock.now(), Duration::from_millis(100));

        clock.advance(Duration::from_millis(50));
        assert!(!timer.fire_if_due(clock.now()));

        clock.advance(Duration::from_millis(50));
        assert!(timer.fire_if_due(clock.now()));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let clock = ManualClock::new();
        let mut timer = DeferredTimer::new();
        timer.schedule(clock.now(), Duration::from_millis(10));

        assert!(timer.cancel());
        assert!(!timer.cancel());

        clock.advance(Duration::from_secs(1));
        assert!(!timer.fire_if_due(clock.now()));
    }
}
