//! Async utilities for outbound calls
//!
//! - Fixed-budget retries with no backoff
//! - Timeout wrappers that keep "timed out" distinct from "failed"
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::async_utils::retry::{RetryPolicy, with_retry};
//! use tooling::async_utils::timeout::with_timeout;
//! use std::time::Duration;
//!
//! // One first attempt plus two retries, each bounded to 20 seconds
//! let policy = RetryPolicy::new(2);
//! let body = with_retry(&policy, "model_query", || async {
//!     with_timeout(Duration::from_secs(20), call_model()).await
//! })
//! .await?;
//! ```

pub mod retry;
pub mod timeout;
