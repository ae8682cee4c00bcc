//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "tracker=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DebugConfig {
    /// Log level filter (e.g., "tracker=debug,info")
    pub log_level: String,
    /// Log directory (daily rotation happens here)
    pub log_dir: PathBuf,
    /// Log file name prefix; the date is appended on rotation
    pub log_file_prefix: String,
    /// Also write human-readable logs to stderr
    pub log_to_stderr: bool,
    /// Write the file log as JSON lines instead of plain text
    pub json_file: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "tracker.log".to_string(),
            log_to_stderr: false,
            json_file: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: lookup("TRACKER_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_file_prefix: defaults.log_file_prefix,
            log_to_stderr: lookup("TRACKER_LOG_STDERR")
                .map(|v| v == "1")
                .unwrap_or(defaults.log_to_stderr),
            json_file: lookup("TRACKER_LOG_JSON")
                .map(|v| v == "1")
                .unwrap_or(defaults.json_file),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
