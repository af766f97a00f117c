//! Rounding and date helpers shared by both schedulers.

use chrono::{NaiveDate, TimeDelta};

/// Round to two decimal places, the precision returned to callers.
///
/// Rounds the exact binary value, so 1.115 (stored just below 1.115) gives
/// 1.11. Exact ties, which are the odd multiples of 1/8, go away from zero.
pub fn round_2dp(value: f64) -> f64 {
  let eighths = value * 8.0;
  if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
    // value * 100 is exact here
    return (value * 100.0).round() / 100.0;
  }
  format!("{:.2}", value).parse().unwrap_or(value)
}

/// Round to the nearest whole day, ties toward positive infinity.
///
/// `f64::round` sends -2.5 to -3; interval rounding sends it to -2 so that
/// negative and positive halves behave the same way. NaN maps to 0 and
/// infinities saturate.
pub fn round_days(value: f64) -> i64 {
  let rounded = value.round();
  let rounded = if value < 0.0 && rounded - value == -0.5 {
    rounded + 1.0
  } else {
    rounded
  };
  rounded as i64
}

/// `today` shifted by `days`, saturating at the calendar limits
pub fn days_from(today: NaiveDate, days: i64) -> NaiveDate {
  TimeDelta::try_days(days)
    .and_then(|delta| today.checked_add_signed(delta))
    .unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}
