//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::context::UserContextProvider;
use crate::pipeline::Orchestrator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub profiles: Arc<dyn UserContextProvider>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, profiles: Arc<dyn UserContextProvider>) -> Self {
        Self {
            orchestrator,
            profiles,
        }
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/orchestrate", post(handlers::orchestrate))
        .route("/orchestrate/", post(handlers::orchestrate))
        .with_state(state)
}
