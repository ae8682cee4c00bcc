//! # Logging
//!
//! `tracing` subscriber setup for the binary: env-filtered, daily-rotated file
//! log, optional stderr output and a panic hook.

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::{init, init_with};
