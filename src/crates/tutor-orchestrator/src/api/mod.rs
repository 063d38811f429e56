//! HTTP front door
//!
//! - `POST /orchestrate/` runs the pipeline for one message
//! - `GET /health` reports liveness and the crate version

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::{create_router, AppState};
