//! Runtime configuration from environment variables (and `.env`, loaded by
//! the binary before this runs).

use std::env;
use std::path::PathBuf;
use tracing::warn;

use crate::diary::RolloverPolicy;
use crate::logging::LogFormat;
use crate::pricing::Country;

pub const DEFAULT_EXPORT_DIR: &str = "exports";
pub const DEFAULT_DIARY_STORE: &str = "diary_store.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Country used when a session names an unknown one (`WELLNESS_DEFAULT_COUNTRY`)
    pub default_country: Country,
    /// Where workbooks are written (`WELLNESS_EXPORT_DIR`)
    pub export_dir: PathBuf,
    /// Diary JSON store (`WELLNESS_DIARY_STORE`)
    pub diary_store: PathBuf,
    /// `WELLNESS_DIARY_ROLLOVER`: discard | archive
    pub rollover: RolloverPolicy,
    /// Fallback filter when `RUST_LOG` is unset (`WELLNESS_LOG_LEVEL`)
    pub log_level: String,
    /// `WELLNESS_LOG_FORMAT`: pretty | compact | json
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_country: Country::default(),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            diary_store: PathBuf::from(DEFAULT_DIARY_STORE),
            rollover: RolloverPolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Invalid values fall back to the
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let default_country = match var("WELLNESS_DEFAULT_COUNTRY") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Unknown WELLNESS_DEFAULT_COUNTRY, using Perú");
                defaults.default_country
            }),
            None => defaults.default_country,
        };

        let rollover = match var("WELLNESS_DIARY_ROLLOVER") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid WELLNESS_DIARY_ROLLOVER, using archive");
                defaults.rollover
            }),
            None => defaults.rollover,
        };

        let log_format = match var("WELLNESS_LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Invalid WELLNESS_LOG_FORMAT, using pretty");
                defaults.log_format
            }),
            None => defaults.log_format,
        };

        Self {
            default_country,
            export_dir: var("WELLNESS_EXPORT_DIR").map(PathBuf::from).unwrap_or(defaults.export_dir),
            diary_store: var("WELLNESS_DIARY_STORE").map(PathBuf::from).unwrap_or(defaults.diary_store),
            rollover,
            log_level: var("WELLNESS_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
        }
    }
}
