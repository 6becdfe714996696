//! Configuration module for the donation subsystem.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::store::ReadPolicy;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Subsystem configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the key-value slots
    pub db_path: PathBuf,
    /// Slot the donation collection is stored under
    pub storage_slot: String,
    /// How the store treats an unreadable collection when appending
    pub read_policy: ReadPolicy,
    /// Simulated processing delay before a submission is accepted
    pub submit_delay: Duration,
    /// Number of entries in the recent donations view
    pub recent_limit: usize,
    /// Attempts at minting a non-colliding id/receipt pair
    pub max_mint_attempts: u32,
    /// Show sample donations while nothing has been saved
    pub showcase_samples: bool,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "./data/donations.sqlite".into(),
            storage_slot: "books-for-ghana-donations".to_string(),
            read_policy: ReadPolicy::Lenient,
            submit_delay: Duration::from_millis(1000),
            recent_limit: 5,
            max_mint_attempts: 5,
            showcase_samples: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let db_path = env::var("BFG_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let storage_slot = env::var("BFG_STORAGE_SLOT").unwrap_or(defaults.storage_slot);

        let read_policy = parsed("BFG_READ_POLICY")?.unwrap_or(defaults.read_policy);

        let submit_delay = parsed::<u64>("BFG_SUBMIT_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.submit_delay);

        let recent_limit = parsed("BFG_RECENT_LIMIT")?.unwrap_or(defaults.recent_limit);

        let max_mint_attempts = match parsed::<u32>("BFG_MAX_MINT_ATTEMPTS")? {
            Some(0) => {
                return Err(ConfigError {
                    key: "BFG_MAX_MINT_ATTEMPTS".to_string(),
                    value: "0".to_string(),
                })
            }
            Some(n) => n,
            None => defaults.max_mint_attempts,
        };

        let showcase_samples =
            parsed("BFG_SHOWCASE_SAMPLES")?.unwrap_or(defaults.showcase_samples);

        let log_level = env::var("BFG_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = parsed("BFG_LOG_FORMAT")?.unwrap_or(defaults.log_format);

        Ok(Self {
            db_path,
            storage_slot,
            read_policy,
            submit_delay,
            recent_limit,
            max_mint_attempts,
            showcase_samples,
            log_level,
            log_format,
        })
    }
}

/// Read and parse an optional variable. Unset is `None`; unparseable is an error.
fn parsed<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| ConfigError {
            key: key.to_string(),
            value,
        }),
        Err(_) => Ok(None),
    }
}
