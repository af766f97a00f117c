//! Time source for scheduling.
//!
//! The schedulers take `today` as a plain argument. Callers that need the
//! current date go through a [`Clock`] so tests can pin it.

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock {
  fn now(&self) -> DateTime<Utc>;

  /// Calendar date of `now()` in UTC
  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
  instant: DateTime<Utc>,
}

impl FixedClock {
  pub fn new(instant: DateTime<Utc>) -> Self {
    Self { instant }
  }

  /// Midnight UTC of the given date
  pub fn at_date(date: NaiveDate) -> Self {
    Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
  }

  /// Move the clock forward (or back, for negative values) by whole days
  pub fn advance_days(&mut self, days: i64) {
    if let Some(delta) = chrono::TimeDelta::try_days(days) {
      self.instant = self.instant.checked_add_signed(delta).unwrap_or(self.instant);
    }
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.instant
  }
}
