//! Language-model gateway for the tutor orchestrator.
//!
//! The orchestrator only needs one thing from a model: turn a prompt into
//! text. [`ModelGateway`] is that seam, and [`remote::GeminiClient`] is the
//! production implementation talking to Google's `generateContent` API with
//! a bounded timeout and a fixed retry budget.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::{ModelGateway, RemoteLlmConfig};
//! use llm::remote::GeminiClient;
//! use tooling::config::ConfigBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::load("")?;
//!     let client = GeminiClient::new(config)?;
//!
//!     let text = client.ask("Which tool fits 'explain derivatives'?").await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod remote;

pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use gateway::ModelGateway;
