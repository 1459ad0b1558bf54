//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested enums ([`ConfigError`],
//! [`HealthError`], and [`OllamaError`] from the Ollama client). Small helpers
//! for reading/validating environment variables return the unified
//! [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

pub use crate::services::ollama_service::OllamaError;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Health-check/connectivity/decoding errors.
    #[error(transparent)]
    Health(#[from] HealthError),

    /// Generation call failed inside the Ollama client.
    #[error(transparent)]
    Ollama(#[from] OllamaError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// A generator request exceeded the configured client timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),

    /// Prompt exceeds the model limit and truncation was not requested.
    #[error("[AI LLM Service] prompt is {len} chars, limit is {max}")]
    PromptTooLong {
        /// Prompt length in chars.
        len: usize,
        /// Configured limit in chars.
        max: usize,
    },
}

impl AiLlmError {
    /// `true` when the backend rejected *what we sent* rather than being
    /// unreachable or broken.
    ///
    /// Client-side HTTP statuses count as invalid input, except `404`, which
    /// Ollama returns for a model that is not pulled.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            AiLlmError::PromptTooLong { .. } => true,
            AiLlmError::Ollama(OllamaError::HttpStatus { status, .. }) => {
                status.is_client_error() && *status != StatusCode::NOT_FOUND
            }
            _ => false,
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`, `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_KIND`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `OLLAMA_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty or invalid.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Health errors                                                             */
/* ------------------------------------------------------------------------- */

/// Non-successful HTTP response captured for diagnostics.
#[derive(Debug)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// Error enum for provider health checks.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// The endpoint is empty or does not start with http/https.
    #[error("[AI LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] {0}")]
    HttpStatus(HttpError),
}

/// Max chars of an upstream body kept in errors and logs.
const SNIPPET_CHARS: usize = 240;

/// Collapses whitespace and clamps a response body for error messages.
pub fn make_snippet(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    flat.chars().take(SNIPPET_CHARS).collect()
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

fn env_opt_parse<T: std::str::FromStr>(
    name: &'static str,
    reason: &'static str,
) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse::<T>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber { var: name, reason })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    env_opt_parse(name, "expected u32")
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    env_opt_parse(name, "expected u64")
}

/// Parses an optional `usize` from env (`Ok(None)` if unset/empty).
pub fn env_opt_usize(name: &'static str) -> Result<Option<usize>> {
    env_opt_parse(name, "expected unsigned integer")
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_err(code: u16) -> AiLlmError {
        AiLlmError::Ollama(OllamaError::HttpStatus {
            status: StatusCode::from_u16(code).unwrap(),
            url: "http://localhost:11434/api/generate".into(),
            snippet: String::new(),
        })
    }

    #[test]
    fn classifies_client_rejections_as_invalid_input() {
        assert!(status_err(400).is_invalid_input());
        assert!(AiLlmError::PromptTooLong { len: 10, max: 5 }.is_invalid_input());
    }

    #[test]
    fn missing_model_and_server_errors_are_not_invalid_input() {
        assert!(!status_err(404).is_invalid_input());
        assert!(!status_err(500).is_invalid_input());
        assert!(!AiLlmError::Timeout(Duration::from_secs(1)).is_invalid_input());
    }

    #[test]
    fn snippet_is_flattened_and_clamped() {
        let body = format!("error:\n  {}", "x".repeat(500));
        let s = make_snippet(&body);
        assert!(s.starts_with("error: x"));
        assert_eq!(s.chars().count(), SNIPPET_CHARS);
    }
}
