//! Clock and debounce timer used to coalesce typing into history commits.
//!
//! Nothing here spawns a thread or a real timer. The host's event loop asks
//! [`Debouncer::deadline`] when to wake and calls back into the session; tests
//! drive a [`ManualClock`] instead of sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Default quiet period before a live change becomes a history snapshot
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A cancelable, re-armable one-shot deadline
#[derive(Debug, Clone)]
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

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the quiet period from `now`, replacing any pending deadline
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm and return true if the deadline has passed at `now`
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

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = clock.now();
        other.advance(Duration::from_millis(50));
        assert_eq!(clock.now() - start, Duration::from_millis(50));
    }

    #[test]
    fn test_debouncer_fires_once_after_delay() {
        let clock = ManualClock::new();
        let mut timer = Debouncer::new(Duration::from_millis(300));
        timer.arm(clock.now());

        clock.advance(Duration::from_millis(299));
        assert!(!timer.fire_if_due(clock.now()));

        clock.advance(Duration::from_millis(1));
        assert!(timer.fire_if_due(clock.now()));
        assert!(!timer.fire_if_due(clock.now()));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_pushes_deadline_back() {
        let clock = ManualClock::new();
        let mut timer = Debouncer::default();
        timer.arm(clock.now());
        clock.advance(Duration::from_millis(200));
        timer.arm(clock.now());
        clock.advance(Duration::from_millis(200));
        assert!(!timer.fire_if_due(clock.now()));
        clock.advance(Duration::from_millis(100));
        assert!(timer.fire_if_due(clock.now()));
    }

    #[test]
    fn test_cancel() {
        let mut timer = Debouncer::default();
        assert!(!timer.cancel());
        timer.arm(Instant::now());
        assert!(timer.cancel());
        assert_eq!(timer.deadline(), None);
    }
}
