use chrono::NaiveDate;

use super::interval::{days_from, round_2dp, round_days};
use crate::domain::{FsrsCard, FsrsState};

/// Rating value that counts as a failed recall
const AGAIN: u8 = 1;
/// Rating at which difficulty is left unchanged
const NEUTRAL_RATING: f64 = 3.0;

pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 10.0;

pub const DEFAULT_TARGET_RETENTION: f64 = 0.9;

/// Fixed model weights and forgetting-curve decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsrsParameters {
  pub weights: [f64; 17],
  pub decay: f64,
}

pub const DEFAULT_PARAMETERS: FsrsParameters = FsrsParameters {
  weights: [
    0.4, 0.6, 2.4, 5.8, 4.93, 0.94, 0.86, 0.01, 1.49, 0.14, 0.94, 2.18, 0.05, 0.34, 1.26, 0.29,
    2.61,
  ],
  decay: -0.5,
};

impl Default for FsrsParameters {
  fn default() -> Self {
    DEFAULT_PARAMETERS
  }
}

/// Result from FSRS scheduling calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FsrsResult {
  /// Rounded to two decimals
  pub stability: f64,
  /// Clamped to [1, 10], then rounded to two decimals
  pub difficulty: f64,
  pub scheduled_days: i64,
  pub state: FsrsState,
  pub reps: i64,
  pub lapses: i64,
  pub next_review: NaiveDate,
}

impl FsrsResult {
  /// Card state to persist for the next review. `elapsed_days` is bookkeeping
  /// owned by the caller and is carried over from `previous`.
  pub fn card(&self, previous: &FsrsCard) -> FsrsCard {
    FsrsCard {
      stability: self.stability,
      difficulty: self.difficulty,
      elapsed_days: previous.elapsed_days,
      scheduled_days: self.scheduled_days,
      reps: self.reps,
      lapses: self.lapses,
      state: self.state,
    }
  }
}

/// FSRS scheduler over a fixed parameter set. Holds no per-card state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FsrsScheduler {
  params: FsrsParameters,
}

impl FsrsScheduler {
  pub fn new(params: FsrsParameters) -> Self {
    Self { params }
  }

  pub fn parameters(&self) -> &FsrsParameters {
    &self.params
  }

  /// Apply one review.
  ///
  /// Rating: 1=Again, 2=Hard, 3=Good, 4=Easy. Not range-checked here; see
  /// [`crate::validation::validate_rating`].
  pub fn calculate(
    &self,
    card: &FsrsCard,
    rating: u8,
    target_retention: f64,
    today: NaiveDate,
  ) -> FsrsResult {
    let failed = rating == AGAIN;
    let state = next_state(card, failed);

    // Both updates read the difficulty the card came in with
    let stability = self.next_stability(card.stability, card.difficulty, rating);
    let difficulty = self.next_difficulty(card.difficulty, rating);

    let (reps, lapses) = if failed {
      (card.reps, card.lapses.saturating_add(1))
    } else {
      (card.reps.saturating_add(1), card.lapses)
    };

    let scheduled_days = self.interval_days(stability, target_retention);

    tracing::debug!(
      rating,
      stability,
      difficulty,
      scheduled_days,
      state = state.as_str(),
      "fsrs review calculated"
    );

    FsrsResult {
      stability: round_2dp(stability),
      difficulty: round_2dp(difficulty),
      scheduled_days,
      state,
      reps,
      lapses,
      next_review: days_from(today, scheduled_days),
    }
  }

  fn next_stability(&self, stability: f64, difficulty: f64, rating: u8) -> f64 {
    let w = &self.params.weights;
    if rating == AGAIN {
      return stability * (w[11] * (difficulty - 1.0)).exp();
    }
    let r = rating as f64;
    stability
      * (1.0
        + w[8].exp()
          * (11.0 - difficulty)
          * stability.powf(w[9])
          * (((1.0 - r) * w[10]).exp() - 1.0))
  }

  fn next_difficulty(&self, difficulty: f64, rating: u8) -> f64 {
    let delta = rating as f64 - NEUTRAL_RATING;
    (difficulty - self.params.weights[6] * delta).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
  }

  /// Days until recall probability falls to `target_retention`
  fn interval_days(&self, stability: f64, target_retention: f64) -> i64 {
    round_days(stability * (target_retention.powf(1.0 / self.params.decay) - 1.0))
  }
}

/// Learning phase after a review
fn next_state(card: &FsrsCard, failed: bool) -> FsrsState {
  if failed {
    return if card.reps == 0 {
      FsrsState::Learning
    } else {
      FsrsState::Relearning
    };
  }
  match card.state {
    FsrsState::New => FsrsState::Learning,
    FsrsState::Learning | FsrsState::Relearning | FsrsState::Review => FsrsState::Review,
  }
}

/// State for a card that has never been reviewed
pub fn initial_state() -> FsrsCard {
  FsrsCard::initial()
}

/// [`FsrsScheduler::calculate`] with [`DEFAULT_PARAMETERS`]
pub fn calculate_fsrs(
  card: &FsrsCard,
  rating: u8,
  target_retention: f64,
  today: NaiveDate,
) -> FsrsResult {
  FsrsScheduler::default().calculate(card, rating, target_retention, today)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
  }

  fn review_card(stability: f64, difficulty: f64, reps: i64) -> FsrsCard {
    FsrsCard {
      stability,
      difficulty,
      elapsed_days: 4,
      scheduled_days: 4,
      reps,
      lapses: 1,
      state: FsrsState::Review,
    }
  }

  #[test]
  fn test_initial_state() {
    let card = initial_state();
    assert_eq!(card.stability, 1.0);
    assert_eq!(card.difficulty, 5.0);
    assert_eq!(card.scheduled_days, 0);
    assert_eq!(card.state, FsrsState::New);
  }

  #[test]
  fn test_new_card_good() {
    let result = calculate_fsrs(&initial_state(), 3, DEFAULT_TARGET_RETENTION, today());

    assert_eq!(result.state, FsrsState::Learning);
    assert_eq!(result.reps, 1);
    assert_eq!(result.lapses, 0);
    // Good leaves difficulty unchanged
    assert_eq!(result.difficulty, 5.0);
    // 1 * (1 + e^1.49 * 6 * 1^0.14 * (e^-1.88 - 1))
    assert_eq!(result.stability, -21.56);
    assert_eq!(result.scheduled_days, -5);
  }

  #[test]
  fn test_new_card_again_goes_to_learning() {
    let result = calculate_fsrs(&initial_state(), 1, DEFAULT_TARGET_RETENTION, today());

    assert_eq!(result.state, FsrsState::Learning);
    assert_eq!(result.reps, 0);
    assert_eq!(result.lapses, 1);
    // 5 + 0.86 * 2
    assert_eq!(result.difficulty, 6.72);
    // e^(2.18 * 4)
    assert_eq!(result.stability, 6124.18);
    assert_eq!(result.scheduled_days, 1437);
  }

  #[test]
  fn test_again_with_history_goes_to_relearning() {
    let result = calculate_fsrs(&review_card(10.0, 5.0, 3), 1, DEFAULT_TARGET_RETENTION, today());

    assert_eq!(result.state, FsrsState::Relearning);
    assert_eq!(result.reps, 3);
    assert_eq!(result.lapses, 2);
  }

  #[test]
  fn test_again_keys_off_reps_not_state() {
    let mut card = initial_state();
    card.state = FsrsState::Learning;
    let result = calculate_fsrs(&card, 1, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(result.state, FsrsState::Learning);

    card.reps = 1;
    let result = calculate_fsrs(&card, 1, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(result.state, FsrsState::Relearning);
  }

  #[test]
  fn test_success_state_transitions() {
    let cases = [
      (FsrsState::New, FsrsState::Learning),
      (FsrsState::Learning, FsrsState::Review),
      (FsrsState::Relearning, FsrsState::Review),
      (FsrsState::Review, FsrsState::Review),
    ];

    for (from, to) in cases {
      for rating in 2..=4 {
        let mut card = review_card(3.0, 5.0, 2);
        card.state = from;
        let result = calculate_fsrs(&card, rating, DEFAULT_TARGET_RETENTION, today());
        assert_eq!(result.state, to, "{:?} rated {}", from, rating);
        assert_eq!(result.reps, 3);
        assert_eq!(result.lapses, 1);
      }
    }
  }

  #[test]
  fn test_difficulty_steps_by_rating() {
    let card = initial_state();
    let expected = [(1, 6.72), (2, 5.86), (3, 5.0), (4, 4.14)];
    for (rating, difficulty) in expected {
      let result = calculate_fsrs(&card, rating, DEFAULT_TARGET_RETENTION, today());
      assert_eq!(result.difficulty, difficulty, "rating {}", rating);
    }
  }

  #[test]
  fn test_difficulty_clamped() {
    let hard = calculate_fsrs(&review_card(2.0, 10.0, 1), 1, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(hard.difficulty, MAX_DIFFICULTY);

    let easy = calculate_fsrs(&review_card(2.0, 1.2, 1), 4, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(easy.difficulty, MIN_DIFFICULTY);

    for rating in 0..=6 {
      for difficulty in [0.5, 1.0, 4.3, 9.9, 10.0, 12.0] {
        let result =
          calculate_fsrs(&review_card(2.0, difficulty, 1), rating, DEFAULT_TARGET_RETENTION, today());
        assert!(
          (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&result.difficulty),
          "difficulty {} out of range",
          result.difficulty
        );
      }
    }
  }

  #[test]
  fn test_stability_uses_incoming_difficulty() {
    // Hard raises difficulty to 2.06, but stability is computed from 1.2
    let result = calculate_fsrs(&review_card(2.0, 1.2, 1), 2, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(result.stability, -56.4);
    assert_eq!(result.difficulty, 2.06);
  }

  #[test]
  fn test_failure_stability_update() {
    let result = calculate_fsrs(&review_card(10.0, 5.0, 3), 1, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(result.stability, 61241.79);
    assert_eq!(result.scheduled_days, 14365);
  }

  #[test]
  fn test_target_retention_scales_interval() {
    let card = initial_state();
    let default = calculate_fsrs(&card, 1, 0.9, today());
    let lower = calculate_fsrs(&card, 1, 0.8, today());

    assert_eq!(default.scheduled_days, 1437);
    assert_eq!(lower.scheduled_days, 3445);
    assert_eq!(default.stability, lower.stability);
  }

  #[test]
  fn test_next_review_matches_scheduled_days() {
    for rating in 1..=4 {
      let result = calculate_fsrs(&review_card(3.0, 4.0, 2), rating, DEFAULT_TARGET_RETENTION, today());
      assert_eq!((result.next_review - today()).num_days(), result.scheduled_days);
    }
  }

  #[test]
  fn test_deterministic() {
    let card = review_card(4.5, 6.1, 2);
    assert_eq!(
      calculate_fsrs(&card, 2, 0.85, today()),
      calculate_fsrs(&card, 2, 0.85, today())
    );
  }

  #[test]
  fn test_custom_parameters() {
    let mut params = DEFAULT_PARAMETERS;
    params.weights[6] = 1.0;
    let scheduler = FsrsScheduler::new(params);

    let result = scheduler.calculate(&initial_state(), 4, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(result.difficulty, 4.0);
    assert_eq!(scheduler.parameters().weights[6], 1.0);
  }

  #[test]
  fn test_counters_saturate() {
    let mut card = review_card(3.0, 5.0, i64::MAX);
    card.lapses = i64::MAX;

    let failed = calculate_fsrs(&card, 1, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(failed.lapses, i64::MAX);

    let passed = calculate_fsrs(&card, 3, DEFAULT_TARGET_RETENTION, today());
    assert_eq!(passed.reps, i64::MAX);
  }

  #[test]
  fn test_result_card_carries_bookkeeping() {
    let previous = review_card(3.0, 4.0, 2);
    let result = calculate_fsrs(&previous, 3, DEFAULT_TARGET_RETENTION, today());
    let next = result.card(&previous);

    assert_eq!(next.elapsed_days, previous.elapsed_days);
    assert_eq!(next.scheduled_days, result.scheduled_days);
    assert_eq!(next.reps, 3);
    assert_eq!(next.state, FsrsState::Review);
  }
}
