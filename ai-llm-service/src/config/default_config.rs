//! Default generator config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `LLM_KIND`              = provider kind (default `ollama`)
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`          = generation model (mandatory)
//! - `LLM_MAX_TOKENS`        = optional default token cap (u32)
//! - `LLM_TIMEOUT_SECS`      = optional request timeout (default 60)
//! - `LLM_MAX_PROMPT_CHARS`  = optional prompt limit (default 1024)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_u32, env_opt_u64, env_opt_usize, must_env,
        validate_http_endpoint,
    },
};

/// Prompt limit used when `LLM_MAX_PROMPT_CHARS` is unset.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 1024;

/// Request timeout used when `LLM_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `url` if present and non-empty
/// 2. `port` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if the port is not a `u16`
/// - [`ConfigError::InvalidFormat`] if the URL lacks an http(s) scheme
fn resolve_endpoint(url: Option<String>, port: Option<String>) -> Result<String, AiLlmError> {
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        let url = url.trim().to_string();
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs the config for the fallback **generator** model.
///
/// # Env
/// - `OLLAMA_MODEL` (required)
/// - `OLLAMA_URL` / `OLLAMA_PORT` (one required)
/// - `LLM_KIND`, `LLM_MAX_TOKENS`, `LLM_TIMEOUT_SECS`, `LLM_MAX_PROMPT_CHARS` (optional)
///
/// # Defaults
/// - `temperature = None` (model default sampling)
/// - `timeout_secs = Some(60)`
pub fn config_ollama_generator() -> Result<LlmModelConfig, AiLlmError> {
    let provider = std::env::var("LLM_KIND")
        .unwrap_or_default()
        .parse::<LlmProvider>()?;
    let endpoint = resolve_endpoint(
        std::env::var("OLLAMA_URL").ok(),
        std::env::var("OLLAMA_PORT").ok(),
    )?;
    let model = must_env("OLLAMA_MODEL")?;
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    Ok(LlmModelConfig {
        provider,
        model: model.trim().to_string(),
        endpoint,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: None,
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        max_prompt_chars: env_opt_usize("LLM_MAX_PROMPT_CHARS")?
            .unwrap_or(DEFAULT_MAX_PROMPT_CHARS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_wins_over_port() {
        let ep = resolve_endpoint(
            Some("http://gpu-box:11434".into()),
            Some("9999".into()),
        )
        .unwrap();
        assert_eq!(ep, "http://gpu-box:11434");
    }

    #[test]
    fn port_falls_back_to_localhost() {
        let ep = resolve_endpoint(Some("   ".into()), Some("11434".into())).unwrap();
        assert_eq!(ep, "http://localhost:11434");
    }

    #[test]
    fn bad_port_and_missing_endpoint_are_rejected() {
        assert!(matches!(
            resolve_endpoint(None, Some("port".into())),
            Err(AiLlmError::Config(ConfigError::InvalidNumber { var: "OLLAMA_PORT", .. }))
        ));
        assert!(matches!(
            resolve_endpoint(None, None),
            Err(AiLlmError::Config(ConfigError::MissingVar(_)))
        ));
        assert!(matches!(
            resolve_endpoint(Some("localhost:11434".into()), None),
            Err(AiLlmError::Config(ConfigError::InvalidFormat { .. }))
        ));
    }
}
