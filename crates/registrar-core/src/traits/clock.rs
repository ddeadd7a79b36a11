//! Injected notion of "today" for date-windowed rules.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Calendar date used for issue dates and cooldown arithmetic.
    fn today(&self) -> NaiveDate;
}

/// Wall clock, local calendar date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable clock for tests and back-dated data entry.
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(|e| e.into_inner()) = today;
    }

    pub fn advance_days(&self, days: i64) {
        let mut guard = self.today.lock().unwrap_or_else(|e| e.into_inner());
        *guard += Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}
