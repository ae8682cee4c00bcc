//! # Application Configuration
//!
//! Settings loaded from `TRACKER_*` environment variables (after `.env` has
//! been applied by the binary). Every value has a default; [`AppConfig::validate`]
//! runs on startup so a bad value fails fast.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TRACKER_API_URL` | `https://api.coingecko.com/api/v3` |
//! | `TRACKER_PORTFOLIO_PATH` | `data/portfolio.json` |
//! | `TRACKER_SEARCH_DEBOUNCE_MS` | `500` |
//! | `TRACKER_HTTP_TIMEOUT_SECS` | `10` |
//! | `TRACKER_COINS_PER_PAGE` | `250` |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Upper bound the markets endpoint accepts for `per_page`.
pub const MAX_COINS_PER_PAGE: u32 = 250;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Market data API base URL
    pub api_url: String,

    /// JSON file holding the saved portfolio
    pub portfolio_path: PathBuf,

    /// Quiescence window of the coin list, in milliseconds
    pub search_debounce_ms: u64,

    /// Per-request HTTP timeout
    pub http_timeout_secs: u64,

    /// Coins requested from the catalog endpoint. Valid range: 1-250
    pub coins_per_page: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            portfolio_path: PathBuf::from("data/portfolio.json"),
            search_debounce_ms: 500,
            http_timeout_secs: 10,
            coins_per_page: MAX_COINS_PER_PAGE,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            api_url: lookup("TRACKER_API_URL").unwrap_or(defaults.api_url),
            portfolio_path: lookup("TRACKER_PORTFOLIO_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.portfolio_path),
            search_debounce_ms: parse_var(&lookup, "TRACKER_SEARCH_DEBOUNCE_MS", defaults.search_debounce_ms)?,
            http_timeout_secs: parse_var(&lookup, "TRACKER_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            coins_per_page: parse_var(&lookup, "TRACKER_COINS_PER_PAGE", defaults.coins_per_page)?,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(AppError::Config("TRACKER_API_URL must not be empty".to_string()));
        }

        if self.http_timeout_secs == 0 {
            return Err(AppError::Config("TRACKER_HTTP_TIMEOUT_SECS must be at least 1".to_string()));
        }

        if self.coins_per_page < 1 || self.coins_per_page > MAX_COINS_PER_PAGE {
            return Err(AppError::Config(format!(
                "TRACKER_COINS_PER_PAGE must be between 1 and {}",
                MAX_COINS_PER_PAGE
            )));
        }

        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} must be a valid number: {}", key, e))),
        None => Ok(default),
    }
}
