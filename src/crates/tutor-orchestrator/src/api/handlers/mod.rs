//! API request handlers

mod health;
mod orchestrate;

pub use health::health;
pub use orchestrate::orchestrate;
