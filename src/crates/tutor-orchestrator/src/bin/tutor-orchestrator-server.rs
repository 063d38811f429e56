//! Tutor orchestrator server binary
//!
//! Serves `POST /orchestrate/` and `GET /health`. All settings come from the
//! environment; see `tutor_orchestrator::config`.

use anyhow::Context;
use llm::remote::GeminiClient;
use std::sync::Arc;
use tooling::config::ConfigBuilder;
use tooling::logging::sanitize_for_logging;
use tutor_orchestrator::api::{create_router, AppState};
use tutor_orchestrator::{
    Orchestrator, OrchestratorConfig, SchemaRegistry, StaticProfileProvider, ToolDispatcher,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(rust_log).init();

    tracing::info!("Loading configuration from environment");
    let config = OrchestratorConfig::load("").context("invalid configuration")?;

    if config.model.api_key.is_empty() && !config.model.api_url.contains("key=") {
        tracing::warn!("GEMINI_API_KEY is not set; model requests will likely be rejected");
    }
    tracing::info!(
        "Model endpoint: {}",
        sanitize_for_logging(&config.model.api_url)
    );
    tracing::info!(
        "Model timeout: {:?}, retries: {}",
        config.model.timeout,
        config.model.max_retries
    );

    let registry = Arc::new(SchemaRegistry::builtin());
    for tool in registry.tool_names() {
        match config.endpoints.get(tool) {
            Some(url) => tracing::info!("Tool {} -> {}", tool, sanitize_for_logging(url)),
            None => tracing::info!("Tool {} has no endpoint; responses will be mocked", tool),
        }
    }

    let gateway = Arc::new(GeminiClient::new(config.model.clone())?);
    let dispatcher = ToolDispatcher::new(config.endpoints.clone(), config.tool_timeout())?;
    let orchestrator = Orchestrator::new(gateway, registry, dispatcher);

    let state = AppState::new(
        Arc::new(orchestrator),
        Arc::new(StaticProfileProvider::default()),
    );
    let app = create_router(state);

    let addr = config.bind_addr();
    tracing::info!("Starting tutor orchestrator on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Tutor orchestrator shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
