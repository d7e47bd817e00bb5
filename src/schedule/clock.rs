//! Time source abstraction.
//!
//! `today()` is the single impure primitive in the scheduler; everything
//! else is a pure function of it. Injecting the clock (instead of a
//! module-level "today") makes every date computation deterministic
//! under test.

use chrono::NaiveDate;

/// Source of the current date.
pub trait Clock {
    /// The current date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates in the local timezone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date. Test double.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
