pub mod fsrs_scheduler;
pub mod interval;
pub mod sm2;

pub use fsrs_scheduler::{
  calculate_fsrs, FsrsParameters, FsrsResult, FsrsScheduler, DEFAULT_PARAMETERS,
  DEFAULT_TARGET_RETENTION,
};
pub use sm2::{calculate_sm2, Sm2Result, MIN_EASE_FACTOR};
