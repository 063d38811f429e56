//! Configuration management utilities
//!
//! - `ConfigBuilder` trait for loading and validating configuration
//! - Environment variable helpers that distinguish "unset" from "invalid"
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::config::{ConfigBuilder, get_env_parse_or};
//!
//! #[derive(Clone, Default)]
//! struct ServerConfig {
//!     pub port: u16,
//! }
//!
//! impl ConfigBuilder for ServerConfig {
//!     fn from_env(prefix: &str) -> tooling::Result<Self> {
//!         Ok(Self { port: get_env_parse_or(&format!("{}PORT", prefix), 8000)? })
//!     }
//! }
//! ```

mod builder;
mod env;

pub use builder::ConfigBuilder;
pub use env::{get_env, get_env_or, get_env_parse, get_env_parse_or, get_env_secs_or};
