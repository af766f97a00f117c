//! Input checks applied before a review reaches the schedulers.
//!
//! The schedulers accept any numeric input and never clamp it. Range and
//! sanity checks live here so that a malformed grade or a corrupted stored
//! state is rejected with a validation error instead of producing a
//! meaningless schedule.

use thiserror::Error;

use crate::domain::{FsrsCard, QualityLevel, Rating, Sm2Card};
use crate::srs::MIN_EASE_FACTOR;
use crate::srs::fsrs_scheduler::{MAX_DIFFICULTY, MIN_DIFFICULTY};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
  #[error("quality must be between 0 and 5, got {value}")]
  QualityOutOfRange { value: i64 },

  #[error("rating must be between 1 and 4, got {value}")]
  RatingOutOfRange { value: i64 },

  #[error("ease factor must be a finite number >= {min}, got {0}", min = MIN_EASE_FACTOR)]
  InvalidEaseFactor(f64),

  #[error("stability must be a finite positive number, got {0}")]
  InvalidStability(f64),

  #[error("difficulty must be between {min} and {max}, got {0}", min = MIN_DIFFICULTY, max = MAX_DIFFICULTY)]
  InvalidDifficulty(f64),

  #[error("target retention must be between 0 and 1 (exclusive), got {0}")]
  InvalidTargetRetention(f64),

  #[error("{field} must not be negative, got {value}")]
  NegativeCounter { field: &'static str, value: i64 },

  #[error("interval must be at least 1 for a reviewed card (repetition {repetition}), got {interval}")]
  InvalidInterval { interval: i64, repetition: i64 },

  #[error("first review delay must not be negative, got {0} days")]
  InvalidFirstReviewDelay(i64),
}

// ============================================================================
// Grades
// ============================================================================

/// SM-2 quality: 0..=5
pub fn validate_quality(value: i64) -> Result<QualityLevel, ValidationError> {
  QualityLevel::from_value(value).ok_or(ValidationError::QualityOutOfRange { value })
}

/// FSRS rating: 1..=4
pub fn validate_rating(value: i64) -> Result<Rating, ValidationError> {
  Rating::from_value(value).ok_or(ValidationError::RatingOutOfRange { value })
}

pub fn validate_target_retention(value: f64) -> Result<f64, ValidationError> {
  if value.is_finite() && value > 0.0 && value < 1.0 {
    Ok(value)
  } else {
    Err(ValidationError::InvalidTargetRetention(value))
  }
}

// ============================================================================
// Stored state
// ============================================================================

fn non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
  if value < 0 {
    return Err(ValidationError::NegativeCounter { field, value });
  }
  Ok(())
}

pub fn validate_sm2_card(card: &Sm2Card) -> Result<(), ValidationError> {
  if !card.ease_factor.is_finite() || card.ease_factor < MIN_EASE_FACTOR {
    return Err(ValidationError::InvalidEaseFactor(card.ease_factor));
  }
  non_negative("interval", card.interval)?;
  non_negative("repetition", card.repetition)?;
  // Only a never-reviewed card may sit at interval 0
  if card.repetition > 0 && card.interval < 1 {
    return Err(ValidationError::InvalidInterval {
      interval: card.interval,
      repetition: card.repetition,
    });
  }
  Ok(())
}

pub fn validate_first_review_delay(days: i64) -> Result<i64, ValidationError> {
  if days < 0 {
    return Err(ValidationError::InvalidFirstReviewDelay(days));
  }
  Ok(days)
}

pub fn validate_fsrs_card(card: &FsrsCard) -> Result<(), ValidationError> {
  if !card.stability.is_finite() || card.stability <= 0.0 {
    return Err(ValidationError::InvalidStability(card.stability));
  }
  if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&card.difficulty) {
    return Err(ValidationError::InvalidDifficulty(card.difficulty));
  }
  non_negative("reps", card.reps)?;
  non_negative("lapses", card.lapses)
}
