//! # Common Error Types
//!
//! Consolidated error handling for the tracker.
//!
//! ## Error Categories
//!
//! - **Api**: Market data API communication errors (network, HTTP status)
//! - **Parse**: Response bodies or stored files that fail to decode
//! - **Storage**: Portfolio persistence failures (file I/O)
//! - **Config**: Missing or invalid configuration values
//! - **Validation**: Rejected user input
//!
//! The derivation core never produces these: absent data is a value there, not
//! an error. They surface only at the collaborator boundary, where fetch tasks
//! log them and keep the last published values.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use tracker::core::error::{AppError, Result};
//!
//! fn validate_amount(amount: f64) -> Result<f64> {
//!     if !amount.is_finite() {
//!         return Err(AppError::Validation("Amount must be a finite number".to_string()));
//!     }
//!     Ok(amount)
//! }
//!
//! assert!(validate_amount(f64::NAN).is_err());
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// Each variant carries a descriptive message. The `#[error]` attribute from
/// `thiserror` provides `Display` and `Error`.
///
/// ```rust
/// use tracker::core::error::AppError;
///
/// let err = AppError::Api("Connection timeout".to_string());
/// assert_eq!(err.to_string(), "API error: Connection timeout");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Network failure or non-success HTTP status from the market data API.
    #[error("API error: {0}")]
    Api(String),

    /// A response body or stored file could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Reading or writing the portfolio store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration value missing or out of range.
    #[error("Config error: {0}")]
    Config(String),

    /// User input rejected before reaching a collaborator.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::Api(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
