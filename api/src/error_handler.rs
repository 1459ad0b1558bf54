use ai_llm_service::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use faq_base::FaqBaseError;
use thiserror::Error;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("generator config: {0}")]
    Llm(#[from] AiLlmError),

    #[error("corpus/selector setup: {0}")]
    Faq(#[from] FaqBaseError),

    #[error("page template: {0}")]
    Template(#[from] tera::Error),

    // --- IO / network / server ---
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        field: Option<&'static str>,
    },
}

impl AppError {
    /// Bad request pointing at one field of the payload.
    pub fn bad_field(field: &'static str, message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            field: Some(field),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            // startup-only
            AppError::Llm(_) | AppError::Faq(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Llm(_) => "LLM_CONFIG_ERROR",
            AppError::Faq(FaqBaseError::CorpusNotFound { .. }) => "CORPUS_NOT_FOUND",
            AppError::Faq(
                FaqBaseError::CorpusParse { .. } | FaqBaseError::CorpusEncoding { .. },
            ) => "CORPUS_PARSE_ERROR",
            AppError::Faq(_) => "CONFIG_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest { .. } => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            AppError::BadRequest {
                field: Some(field), ..
            } => vec![ApiErrorDetail::field(*field, "must be a non-empty string")],
            _ => Vec::new(),
        };
        ApiResponse::<()>::error(self.error_code(), self.to_string(), details)
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn corpus_errors_get_specific_codes() {
        let err = AppError::from(FaqBaseError::CorpusNotFound {
            path: PathBuf::from("faq.jsonl"),
        });
        assert_eq!(err.error_code(), "CORPUS_NOT_FOUND");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("faq.jsonl"));
    }

    #[test]
    fn bad_field_is_a_400() {
        let err = AppError::bad_field("question", "question must not be empty");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
