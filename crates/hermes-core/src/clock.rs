//! Wall-clock abstraction.
//!
//! The engine never reads the system clock itself; every time-dependent
//! method takes `now` as a parameter. Drivers pick the source: real runs
//! use [`SystemClock`], tests and the simtest harness step a
//! [`ManualClock`] so countdown and animation timing are reproducible.

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current wall-clock instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: Cell::new(start) }
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.current.set(self.current.get() + delta);
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.current.set(instant);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_on_demand() {
        let start = Utc::now();
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);

        clock.advance(TimeDelta::milliseconds(1_500));
        assert_eq!(clock.now(), start + TimeDelta::milliseconds(1_500));
    }

    #[test]
    fn test_manual_clock_set_jumps() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let later = start + TimeDelta::seconds(60);

        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
