//! Deadline timers for debounced and periodic saves.
//!
//! Timers do not run on their own. They hold deadlines that the owner checks
//! on every tick against a [`Clock`], which keeps the controller
//! single-threaded and lets tests drive time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use web_time::Instant;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `web_time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

/// Single pending deadline that fires once after a quiet period.
///
/// Scheduling again replaces the previous deadline, so a burst of triggers
/// fires once, `delay` after the last one.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// (Re)arm the timer relative to `now`. A deadline past the clock's
    /// range never fires.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.delay);
        log::trace!("Debounce: scheduled in {:?}", self.delay);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            log::trace!("Debounce: cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire the timer if its deadline has passed. Disarms it when it fires.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Repeating deadline with a fixed period.
#[derive(Debug)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    /// Create a stopped interval.
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Start ticking; the first fire is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = now.checked_add(self.period);
        log::trace!("Interval: started with period {:?}", self.period);
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Fire if a period has elapsed. Missed periods collapse into one fire.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                self.next = now.checked_add(self.period);
                true
            }
            _ => false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
