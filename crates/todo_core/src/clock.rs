//! Time source abstraction.
//!
//! Task creation timestamps and the search debounce both read time through
//! [`Clock`], so tests can drive them with [`ManualClock`] instead of
//! sleeping.

use chrono::{DateTime, TimeDelta, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of the current UTC time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock forward by `millis` milliseconds.
    pub fn advance_millis(&self, millis: i64) {
        self.now.set(self.now.get() + TimeDelta::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
