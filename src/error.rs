//! Error types for the review boundary. The schedulers themselves never fail.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("unknown algorithm: {0}")]
  UnknownAlgorithm(String),

  #[error("failed to read config: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("failed to parse config: {0}")]
  ConfigParse(#[from] toml::de::Error),
}

impl Error {
  /// Stable machine-readable code for API responses
  pub fn code(&self) -> &'static str {
    match self {
      Self::Validation(_) | Self::UnknownAlgorithm(_) => "VALIDATION_ERROR",
      Self::ConfigRead(_) | Self::ConfigParse(_) => "INTERNAL_SERVER_ERROR",
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display() {
    let err = Error::UnknownAlgorithm("leitner".into());
    assert_eq!(err.to_string(), "unknown algorithm: leitner");

    let err: Error = ValidationError::RatingOutOfRange { value: 9 }.into();
    assert_eq!(err.to_string(), "rating must be between 1 and 4, got 9");
  }

  #[test]
  fn test_error_codes() {
    let err: Error = ValidationError::QualityOutOfRange { value: -1 }.into();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    let err = Error::ConfigRead(std::io::Error::other("disk"));
    assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
  }
}
