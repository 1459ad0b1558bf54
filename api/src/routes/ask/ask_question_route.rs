//! POST /ask_question — JSON access to the response selector.

use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask_question
///
/// The question reaches the selector untrimmed; trimming only decides
/// whether it is empty.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8501/ask_question \
///   -H 'content-type: application/json' \
///   -d '{"question":"How do I save an Excel file?"}'
/// ```
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> AppResult<ApiResponse<AskResponse>> {
    if body.question.trim().is_empty() {
        return Err(AppError::bad_field("question", "question must not be empty"));
    }

    let selection = state.selector.select(&body.question).await;
    info!(target: "api::http", source = ?selection.source, "ask_question answered");

    Ok(ApiResponse::success(AskResponse::from(selection)))
}
