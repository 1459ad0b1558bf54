use std::sync::Arc;

use axum::extract::State;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::health::health_response::HealthResponse,
};

/// Handler: GET /health
///
/// Always `200`; a down backend shows up as `generator.ok = false`.
pub async fn health(State(state): State<Arc<AppState>>) -> ApiResponse<HealthResponse> {
    let (generator_loaded, generator) = match &state.generator_probe {
        Some(probe) => (
            probe.generator.is_loaded(),
            Some(probe.health.check(probe.generator.config()).await),
        ),
        None => (false, None),
    };

    ApiResponse::success(HealthResponse {
        corpus_records: state.selector.corpus().len(),
        keyword_overrides: state.selector.config().keyword_overrides.len(),
        generator_loaded,
        generator,
    })
}
