use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Algorithm;

/// SM-2 recall quality, 0-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityLevel {
  CompleteBlackout = 0,
  /// Incorrect, but the answer seemed familiar
  IncorrectEasyRecall = 1,
  IncorrectHardRecall = 2,
  /// Correct with serious difficulty
  CorrectHardRecall = 3,
  CorrectHesitation = 4,
  PerfectResponse = 5,
}

impl QualityLevel {
  pub fn from_value(value: i64) -> Option<Self> {
    match value {
      0 => Some(Self::CompleteBlackout),
      1 => Some(Self::IncorrectEasyRecall),
      2 => Some(Self::IncorrectHardRecall),
      3 => Some(Self::CorrectHardRecall),
      4 => Some(Self::CorrectHesitation),
      5 => Some(Self::PerfectResponse),
      _ => None,
    }
  }

  pub fn value(&self) -> u8 {
    *self as u8
  }

  /// Quality 3 and above counts as a successful recall
  pub fn is_pass(&self) -> bool {
    *self >= Self::CorrectHardRecall
  }
}

/// FSRS rating, 1-4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
  Again = 1,
  Hard = 2,
  Good = 3,
  Easy = 4,
}

impl Rating {
  pub fn from_value(value: i64) -> Option<Self> {
    match value {
      1 => Some(Self::Again),
      2 => Some(Self::Hard),
      3 => Some(Self::Good),
      4 => Some(Self::Easy),
      _ => None,
    }
  }

  pub fn value(&self) -> u8 {
    *self as u8
  }

  pub fn is_pass(&self) -> bool {
    !matches!(self, Self::Again)
  }
}

/// One review event, as the caller would persist it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLog {
  pub flashcard_id: i64,
  /// Raw grade: SM-2 quality or FSRS rating depending on `algorithm`
  pub grade: u8,
  pub algorithm: Algorithm,
  pub reviewed_at: DateTime<Utc>,
  pub time_spent_secs: u32,
}

impl ReviewLog {
  pub fn new(flashcard_id: i64, grade: u8, algorithm: Algorithm, reviewed_at: DateTime<Utc>) -> Self {
    Self {
      flashcard_id,
      grade,
      algorithm,
      reviewed_at,
      time_spent_secs: 0,
    }
  }

  pub fn with_time_spent(mut self, secs: u32) -> Self {
    self.time_spent_secs = secs;
    self
  }
}
