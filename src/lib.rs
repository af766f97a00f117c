pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod review;
pub mod srs;
pub mod validation;

pub use error::{Error, Result};
