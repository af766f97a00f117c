//! Replay a sequence of grades against a fresh card and print each schedule.
//!
//! ```bash
//! srs-replay sm2 5 4 4 3
//! RUST_LOG=study_srs=info srs-replay fsrs 1 1 1
//! ```

use std::process::ExitCode;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_srs::clock::{Clock, FixedClock};
use study_srs::domain::{Algorithm, Flashcard};
use study_srs::{config, review};

const USAGE: &str = "usage: srs-replay <sm2|fsrs> <grade>...";

fn main() -> ExitCode {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "study_srs=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let Some((algorithm, grades)) = args.split_first() else {
    eprintln!("{}", USAGE);
    return ExitCode::FAILURE;
  };

  let Some(algorithm) = Algorithm::from_str(algorithm) else {
    eprintln!("{}", study_srs::Error::UnknownAlgorithm(algorithm.clone()));
    eprintln!("{}", USAGE);
    return ExitCode::FAILURE;
  };

  let grades: Vec<i64> = match grades.iter().map(|g| g.parse::<i64>()).collect() {
    Ok(grades) => grades,
    Err(e) => {
      eprintln!("invalid grade: {}", e);
      return ExitCode::FAILURE;
    }
  };

  let config = config::load_srs_config();
  let mut clock = FixedClock::new(Utc::now());
  let mut card = Flashcard::new(
    1,
    "replay".to_string(),
    String::new(),
    algorithm,
    clock.today(),
    config.first_review_delay_days,
  );
  clock.advance_days((card.next_review - clock.today()).num_days());

  tracing::info!("Replaying {} grades with {}", grades.len(), algorithm.description());

  for grade in grades {
    let outcome = match review::review_flashcard(&card, grade, &config, &clock) {
      Ok(outcome) => outcome,
      Err(e) => {
        tracing::error!("Replay stopped at grade {} [{}]: {}", grade, e.code(), e);
        return ExitCode::FAILURE;
      }
    };

    let step = serde_json::json!({
      "reviewedOn": clock.today(),
      "grade": grade,
      "intervalDays": outcome.interval_days,
      "nextReview": outcome.card.next_review,
      "schedule": outcome.card.schedule,
    });
    println!("{}", step);

    if outcome.interval_days > 0 {
      clock.advance_days(outcome.interval_days);
    }
    card = outcome.card;
  }

  ExitCode::SUCCESS
}
