//! HTTP shell for the FAQ chatbot.
//!
//! Routes:
//! - `GET /`, `POST /`: the HTML question form
//! - `POST /ask_question`: JSON variant
//! - `GET /health`: corpus size and generator backend probe

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use ai_llm_service::{
    LazyGenerator, config::default_config::config_ollama_generator,
    health_service::HealthService,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use faq_base::SelectorConfig;
use tokio::signal;
use tracing::{info, warn};

use crate::core::app_state::{ApiSettings, AppState};
use crate::error_handler::AppError;
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    ask::ask_question_route::ask_question,
    chat_page::chat_page_route::{show_page, submit_question},
    health::health_route::health,
};

/// Timeout for the `/health` backend probe.
const HEALTH_PROBE_TIMEOUT_SECS: u64 = 5;

/// Build the router over prepared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(show_page).post(submit_question))
        .route("/ask_question", post(ask_question))
        .route("/health", get(health))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Load config and corpus, then serve until Ctrl+C.
///
/// # Errors
/// Any startup failure: generator config, selector config, corpus load,
/// page template, bind. Serving errors surface as [`AppError::Server`].
pub async fn start() -> Result<(), AppError> {
    let settings = ApiSettings::from_env();

    let llm_cfg = config_ollama_generator()?;
    info!(
        target: "api::http",
        model = %llm_cfg.model,
        endpoint = %llm_cfg.endpoint,
        "generator configured (loads on first fallback)"
    );
    let generator = Arc::new(LazyGenerator::new(llm_cfg));

    let selector_cfg = SelectorConfig::from_env()?;
    let selector =
        faq_base::load_selector(&settings.corpus_path, selector_cfg, generator.clone()).await?;

    let health = HealthService::new(Some(HEALTH_PROBE_TIMEOUT_SECS))?;
    let state = Arc::new(AppState::new(selector)?.with_generator_probe(generator, health));

    let listener = tokio::net::TcpListener::bind(&settings.address)
        .await
        .map_err(AppError::Bind)?;
    info!(target: "api::http", address = %settings.address, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!(target: "api::http", "server stopped");
    Ok(())
}

/// Resolves on Ctrl+C. If the handler cannot be installed, waits forever.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(target: "api::http", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
