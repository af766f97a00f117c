use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default SM-2 ease factor for a card that has never been reviewed
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
/// Default FSRS difficulty for a card that has never been reviewed
pub const DEFAULT_DIFFICULTY: f64 = 5.0;
/// Default FSRS stability for a card that has never been reviewed
pub const DEFAULT_STABILITY: f64 = 1.0;

/// Scheduling algorithm selected for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
  #[default]
  Sm2,
  Fsrs,
}

impl Algorithm {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "sm2" | "SM2" => Some(Self::Sm2),
      "fsrs" | "FSRS" => Some(Self::Fsrs),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Sm2 => "sm2",
      Self::Fsrs => "fsrs",
    }
  }

  /// Display name
  pub fn name(&self) -> &'static str {
    match self {
      Self::Sm2 => "SM2",
      Self::Fsrs => "FSRS",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Self::Sm2 => "SuperMemo 2 algorithm for spaced repetition",
      Self::Fsrs => "Free Spaced Repetition Scheduler with probabilistic model",
    }
  }
}

impl std::fmt::Display for Algorithm {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Author-assigned difficulty label. Unrelated to FSRS difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardDifficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

impl CardDifficulty {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "easy" => Some(Self::Easy),
      "medium" => Some(Self::Medium),
      "hard" => Some(Self::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Easy => "easy",
      Self::Medium => "medium",
      Self::Hard => "hard",
    }
  }
}

/// SM-2 scheduling memory for one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sm2Card {
  /// Days until next review (0 only before the first review)
  pub interval: i64,
  /// Consecutive passing reviews since the last lapse
  pub repetition: i64,
  pub ease_factor: f64,
}

impl Sm2Card {
  pub fn initial() -> Self {
    Self {
      interval: 0,
      repetition: 0,
      ease_factor: DEFAULT_EASE_FACTOR,
    }
  }
}

impl Default for Sm2Card {
  fn default() -> Self {
    Self::initial()
  }
}

/// FSRS learning phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FsrsState {
  #[default]
  New,
  Learning,
  Review,
  Relearning,
}

impl FsrsState {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "new" => Some(Self::New),
      "learning" => Some(Self::Learning),
      "review" => Some(Self::Review),
      "relearning" => Some(Self::Relearning),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Learning => "learning",
      Self::Review => "review",
      Self::Relearning => "relearning",
    }
  }
}

/// FSRS scheduling memory for one card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FsrsCard {
  pub stability: f64,
  /// Intrinsic hardness, kept within [1, 10]
  pub difficulty: f64,
  pub elapsed_days: i64,
  pub scheduled_days: i64,
  /// Passing reviews
  pub reps: i64,
  /// Failed reviews
  pub lapses: i64,
  pub state: FsrsState,
}

impl FsrsCard {
  pub fn initial() -> Self {
    Self {
      stability: DEFAULT_STABILITY,
      difficulty: DEFAULT_DIFFICULTY,
      elapsed_days: 0,
      scheduled_days: 0,
      reps: 0,
      lapses: 0,
      state: FsrsState::New,
    }
  }
}

impl Default for FsrsCard {
  fn default() -> Self {
    Self::initial()
  }
}

/// Per-card scheduling state, tagged with the algorithm that owns it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum Schedule {
  Sm2(Sm2Card),
  Fsrs(FsrsCard),
}

impl Schedule {
  pub fn initial(algorithm: Algorithm) -> Self {
    match algorithm {
      Algorithm::Sm2 => Self::Sm2(Sm2Card::initial()),
      Algorithm::Fsrs => Self::Fsrs(FsrsCard::initial()),
    }
  }

  pub fn algorithm(&self) -> Algorithm {
    match self {
      Self::Sm2(_) => Algorithm::Sm2,
      Self::Fsrs(_) => Algorithm::Fsrs,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
  pub id: i64,
  pub question: String,
  pub answer: String,
  pub tags: Vec<String>,
  pub difficulty: CardDifficulty,
  pub schedule: Schedule,
  pub next_review: NaiveDate,
  pub last_reviewed: Option<DateTime<Utc>>,
}

impl Flashcard {
  /// New card in the algorithm's initial state, first due `first_review_delay_days` after `today`
  pub fn new(
    id: i64,
    question: String,
    answer: String,
    algorithm: Algorithm,
    today: NaiveDate,
    first_review_delay_days: i64,
  ) -> Self {
    Self {
      id,
      question,
      answer,
      tags: Vec::new(),
      difficulty: CardDifficulty::default(),
      schedule: Schedule::initial(algorithm),
      next_review: crate::srs::interval::days_from(today, first_review_delay_days),
      last_reviewed: None,
    }
  }

  pub fn with_tags(mut self, tags: Vec<String>) -> Self {
    self.tags = tags;
    self
  }

  pub fn with_difficulty(mut self, difficulty: CardDifficulty) -> Self {
    self.difficulty = difficulty;
    self
  }

  pub fn algorithm(&self) -> Algorithm {
    self.schedule.algorithm()
  }

  pub fn is_due(&self, today: NaiveDate) -> bool {
    self.next_review <= today
  }

  /// Restart scheduling under another algorithm. Review history does not carry over.
  pub fn switch_algorithm(&mut self, algorithm: Algorithm) {
    if self.algorithm() != algorithm {
      self.schedule = Schedule::initial(algorithm);
    }
  }
}
