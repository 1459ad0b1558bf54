//! Generator seam used by the selector.
//!
//! The selector only sees [`TextGenerator`]; the process entry point injects
//! the shared [`LazyGenerator`], tests inject deterministic fakes.

use std::{future::Future, pin::Pin};

use ai_llm_service::{AiLlmError, GenerateParams, LazyGenerator};
use thiserror::Error;

/// One generation call: the raw user query as prompt, a token cap, and
/// whether an over-long prompt may be cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest<'a> {
    pub prompt: &'a str,
    pub max_tokens: u32,
    pub truncate: bool,
}

/// Why a generation call failed.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Backend unreachable, timed out, out of resources, or model missing.
    #[error("generator unavailable: {0}")]
    Unavailable(String),

    /// Backend refused what was sent (e.g. prompt too long).
    #[error("generator rejected the input: {0}")]
    InvalidInput(String),
}

impl From<AiLlmError> for GenerationError {
    fn from(err: AiLlmError) -> Self {
        if err.is_invalid_input() {
            GenerationError::InvalidInput(err.to_string())
        } else {
            GenerationError::Unavailable(err.to_string())
        }
    }
}

/// Asynchronous text generator producing exactly one candidate per call.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>>;
}

impl TextGenerator for LazyGenerator {
    fn generate<'a>(
        &'a self,
        request: GenerationRequest<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<String, GenerationError>> + Send + 'a>> {
        let params = GenerateParams {
            max_tokens: Some(request.max_tokens),
            truncate_prompt: request.truncate,
            return_full_text: true,
        };
        Box::pin(async move {
            LazyGenerator::generate(self, request.prompt, params)
                .await
                .map_err(GenerationError::from)
        })
    }
}
