//! GET / and POST / — the HTML form.

use std::sync::Arc;

use axum::{Form, extract::State, response::Html};
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat_page::{chat_form::ChatForm, page::PageOutcome},
};

/// Handler: GET /
pub async fn show_page(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    Ok(Html(state.chat_page.render("", &PageOutcome::Blank)?))
}

/// Handler: POST /
///
/// Whitespace-only input shows the warning and skips the selector. Anything
/// else goes to the selector exactly as typed.
pub async fn submit_question(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ChatForm>,
) -> AppResult<Html<String>> {
    if form.question.trim().is_empty() {
        return Ok(Html(
            state
                .chat_page
                .render(&form.question, &PageOutcome::EmptyQuestion)?,
        ));
    }

    let selection = state.selector.select(&form.question).await;
    info!(target: "api::http", source = ?selection.source, "form question answered");

    Ok(Html(state.chat_page.render(
        &form.question,
        &PageOutcome::Answer(selection.text),
    )?))
}
