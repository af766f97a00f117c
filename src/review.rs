//! Applying a graded review to a flashcard.
//!
//! This is the caller side of the schedulers: it validates the grade against
//! the card's algorithm, rejects corrupted stored state, runs the matching
//! scheduler, and hands back the updated card plus a review log entry for
//! the caller to persist.

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::config::SrsConfig;
use crate::domain::{Flashcard, ReviewLog, Schedule};
use crate::error::Result;
use crate::srs::{calculate_fsrs, calculate_sm2};
use crate::validation::{
  validate_fsrs_card, validate_quality, validate_rating, validate_sm2_card,
  validate_target_retention,
};

/// Outcome of one review
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
  pub card: Flashcard,
  pub log: ReviewLog,
  /// Days from today to `card.next_review`
  pub interval_days: i64,
}

/// Review `card` with a raw grade (SM-2 quality 0-5 or FSRS rating 1-4).
///
/// The input card is left untouched; the updated copy is in the outcome.
pub fn review_flashcard(
  card: &Flashcard,
  grade: i64,
  config: &SrsConfig,
  clock: &impl Clock,
) -> Result<ReviewOutcome> {
  let now = clock.now();
  let today = clock.today();
  let algorithm = card.algorithm();

  let (schedule, next_review, interval_days, grade) = match &card.schedule {
    Schedule::Sm2(state) => {
      let quality = validate_quality(grade).inspect_err(|e| {
        tracing::warn!(flashcard_id = card.id, "Rejected review: {}", e);
      })?;
      validate_sm2_card(state)?;

      let result = calculate_sm2(state, quality.value(), today);
      (
        Schedule::Sm2(result.card()),
        result.next_review,
        result.interval,
        quality.value(),
      )
    }
    Schedule::Fsrs(state) => {
      let rating = validate_rating(grade).inspect_err(|e| {
        tracing::warn!(flashcard_id = card.id, "Rejected review: {}", e);
      })?;
      validate_fsrs_card(state)?;
      let target_retention = validate_target_retention(config.target_retention)?;

      let result = calculate_fsrs(state, rating.value(), target_retention, today);
      (
        Schedule::Fsrs(result.card(state)),
        result.next_review,
        result.scheduled_days,
        rating.value(),
      )
    }
  };

  let mut updated = card.clone();
  updated.schedule = schedule;
  updated.next_review = next_review;
  updated.last_reviewed = Some(now);

  tracing::info!(
    flashcard_id = card.id,
    grade,
    algorithm = algorithm.as_str(),
    next_review = %next_review,
    "Flashcard reviewed"
  );

  Ok(ReviewOutcome {
    card: updated,
    log: ReviewLog::new(card.id, grade, algorithm, now),
    interval_days,
  })
}

/// Cards due on or before `today`, earliest first
pub fn due_cards(cards: &[Flashcard], today: NaiveDate) -> Vec<&Flashcard> {
  let mut due: Vec<&Flashcard> = cards.iter().filter(|c| c.is_due(today)).collect();
  due.sort_by_key(|c| c.next_review);
  due
}
