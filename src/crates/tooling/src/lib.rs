//! Shared helpers for the tutor orchestrator workspace
//!
//! # Modules
//!
//! - `config` - Environment variable loading and the `ConfigBuilder` trait
//! - `error` - Error chain formatting for log lines
//! - `async_utils` - Fixed-budget retries and timeout wrappers for async calls
//! - `logging` - Timing helpers and log sanitization

pub mod async_utils;
pub mod config;
pub mod error;
pub mod logging;

use thiserror::Error;

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;
