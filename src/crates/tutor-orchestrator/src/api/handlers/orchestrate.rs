use axum::{extract::State, Json};
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::models::{OrchestrateRequest, OrchestrateResponse};
use crate::api::routes::AppState;

/// Handler for POST /orchestrate/
///
/// Looks up the caller's profile and runs the pipeline. Any pipeline
/// failure becomes a 500 with a `detail` message.
pub async fn orchestrate(
    State(state): State<AppState>,
    Json(request): Json<OrchestrateRequest>,
) -> ApiResult<Json<OrchestrateResponse>> {
    info!(
        user_id = %request.user_id,
        history_len = request.chat_history.len(),
        "Orchestration request"
    );

    let context = state.profiles.user_context(&request.user_id);
    let result = state
        .orchestrator
        .orchestrate(&request.message, &request.chat_history, &context)
        .await?;

    Ok(Json(OrchestrateResponse::new(result)))
}
