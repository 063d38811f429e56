//! Remote model providers.
//!
//! - **Gemini** - Google's `generateContent` API

pub mod gemini;

pub use gemini::GeminiClient;
