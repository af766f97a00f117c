use chrono::NaiveDate;

use super::interval::{days_from, round_2dp, round_days};
use crate::domain::Sm2Card;

/// Floor for the ease factor
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Quality below this resets the repetition streak
const PASSING_QUALITY: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sm2Result {
  pub interval: i64,
  pub repetition: i64,
  /// Rounded to two decimals; persist this value and pass it back next time
  pub ease_factor: f64,
  pub next_review: NaiveDate,
}

impl Sm2Result {
  /// Card state to persist for the next review
  pub fn card(&self) -> Sm2Card {
    Sm2Card {
      interval: self.interval,
      repetition: self.repetition,
      ease_factor: self.ease_factor,
    }
  }
}

/// State for a card that has never been reviewed. The caller picks the first
/// review date.
pub fn initial_state() -> Sm2Card {
  Sm2Card::initial()
}

/// Apply one SM-2 review.
///
/// `quality` is expected in 0..=5 and is not range-checked here; see
/// [`crate::validation::validate_quality`].
pub fn calculate_sm2(card: &Sm2Card, quality: u8, today: NaiveDate) -> Sm2Result {
  let q = quality as f64;

  let (interval, repetition) = if quality < PASSING_QUALITY {
    (1, 0)
  } else {
    let interval = match card.repetition {
      0 => 1,
      1 => 6,
      // Grows from the ease factor the card came in with, not the updated one
      _ => round_days(card.interval as f64 * card.ease_factor),
    };
    (interval, card.repetition.saturating_add(1))
  };

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let ease_factor = (card.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  tracing::debug!(quality, interval, repetition, ease_factor, "sm2 review calculated");

  Sm2Result {
    interval,
    repetition,
    ease_factor: round_2dp(ease_factor),
    next_review: days_from(today, interval),
  }
}
