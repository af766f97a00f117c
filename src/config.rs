//! Scheduling configuration.
//!
//! Values are resolved per field with priority: config.toml `[srs]` table >
//! environment (including `.env`) > built-in defaults.

use serde::Deserialize;
use std::path::Path;

use crate::domain::Algorithm;
use crate::error::{Error, Result};
use crate::srs::DEFAULT_TARGET_RETENTION;
use crate::validation::{validate_first_review_delay, validate_target_retention};

/// Default config file, relative to the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Days between card creation and its first review
pub const DEFAULT_FIRST_REVIEW_DELAY_DAYS: i64 = 1;

pub const ENV_TARGET_RETENTION: &str = "SRS_TARGET_RETENTION";
pub const ENV_DEFAULT_ALGORITHM: &str = "SRS_DEFAULT_ALGORITHM";
pub const ENV_FIRST_REVIEW_DELAY_DAYS: &str = "SRS_FIRST_REVIEW_DELAY_DAYS";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SrsConfig {
    /// FSRS target probability of recall when a card comes due
    pub target_retention: f64,
    /// Algorithm for newly created cards
    pub default_algorithm: Algorithm,
    pub first_review_delay_days: i64,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            target_retention: DEFAULT_TARGET_RETENTION,
            default_algorithm: Algorithm::default(),
            first_review_delay_days: DEFAULT_FIRST_REVIEW_DELAY_DAYS,
        }
    }
}

// ==================== File Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    srs: Option<SrsSection>,
}

#[derive(Debug, Default, Deserialize)]
struct SrsSection {
    target_retention: Option<f64>,
    default_algorithm: Option<Algorithm>,
    first_review_delay_days: Option<i64>,
}

impl SrsSection {
    /// Fill unset fields from `fallback`
    fn or(self, fallback: SrsSection) -> SrsSection {
        SrsSection {
            target_retention: self.target_retention.or(fallback.target_retention),
            default_algorithm: self.default_algorithm.or(fallback.default_algorithm),
            first_review_delay_days: self
                .first_review_delay_days
                .or(fallback.first_review_delay_days),
        }
    }

    fn resolve(self) -> Result<SrsConfig> {
        let defaults = SrsConfig::default();
        let target_retention =
            validate_target_retention(self.target_retention.unwrap_or(defaults.target_retention))?;
        let first_review_delay_days = validate_first_review_delay(
            self.first_review_delay_days
                .unwrap_or(defaults.first_review_delay_days),
        )?;

        Ok(SrsConfig {
            target_retention,
            default_algorithm: self.default_algorithm.unwrap_or(defaults.default_algorithm),
            first_review_delay_days,
        })
    }
}

fn parse_section(contents: &str) -> Result<SrsSection> {
    let config: AppConfig = toml::from_str(contents)?;
    Ok(config.srs.unwrap_or_default())
}

impl SrsConfig {
    /// Parse the `[srs]` table of a TOML document. Missing fields take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        parse_section(contents)?.resolve()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

// ==================== Environment Configuration ====================

/// Read the SRS_* variables through `lookup`. Unparseable values are logged
/// and skipped.
fn section_from_env(lookup: impl Fn(&str) -> Option<String>) -> SrsSection {
    let mut section = SrsSection::default();

    if let Some(raw) = lookup(ENV_TARGET_RETENTION) {
        match raw.trim().parse::<f64>() {
            Ok(value) => section.target_retention = Some(value),
            Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_TARGET_RETENTION, raw, e),
        }
    }

    if let Some(raw) = lookup(ENV_DEFAULT_ALGORITHM) {
        match Algorithm::from_str(raw.trim()) {
            Some(algorithm) => section.default_algorithm = Some(algorithm),
            None => tracing::warn!(
                "Ignoring {}: {}",
                ENV_DEFAULT_ALGORITHM,
                Error::UnknownAlgorithm(raw.clone())
            ),
        }
    }

    if let Some(raw) = lookup(ENV_FIRST_REVIEW_DELAY_DAYS) {
        match raw.trim().parse::<i64>() {
            Ok(value) => section.first_review_delay_days = Some(value),
            Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_FIRST_REVIEW_DELAY_DAYS, raw, e),
        }
    }

    section
}

/// Resolve a config from file contents (if any) layered over `lookup`
fn resolve_layers(
    file_contents: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SrsConfig> {
    let file = match file_contents {
        Some(contents) => parse_section(contents)?,
        None => SrsSection::default(),
    };
    file.or(section_from_env(lookup)).resolve()
}

/// Load scheduling config with priority: config.toml > .env/environment > default.
///
/// A broken config file is logged and ignored rather than aborting startup.
pub fn load_srs_config() -> SrsConfig {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let contents = std::fs::read_to_string(CONFIG_FILE).ok();
    if contents.is_some() {
        tracing::info!("Reading SRS settings from {}", CONFIG_FILE);
    }

    match resolve_layers(contents.as_deref(), |key| std::env::var(key).ok()) {
        Ok(config) => {
            tracing::info!(
                "Using target retention {}, default algorithm {}",
                config.target_retention,
                config.default_algorithm.name()
            );
            config
        }
        Err(e) => {
            tracing::warn!("Invalid SRS config, using defaults: {}", e);
            SrsConfig::default()
        }
    }
}
