//! Lightweight Ollama client for plain text continuation.
//!
//! This module implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate` with a prompt — non-streaming raw generation
//! - `POST {endpoint}/api/generate` without a prompt — loads the model into memory
//!
//! Requests use `raw = true`, so the prompt goes to the model without a chat
//! template, the way a plain text-generation pipeline behaves.
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::config::llm_model_config::LlmModelConfig;
//! use ai_llm_service::config::llm_provider::LlmProvider;
//! use ai_llm_service::services::ollama_service::OllamaService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     provider: LlmProvider::Ollama,
//!     model: "gpt2".into(),
//!     endpoint: "http://localhost:11434".into(),
//!     max_tokens: Some(30),
//!     temperature: None,
//!     top_p: None,
//!     timeout_secs: Some(30),
//!     max_prompt_chars: 1024,
//! };
//!
//! let svc = OllamaService::new(cfg)?;
//! svc.load_model().await?;
//! let text = svc.generate("How do I reset my router?", Some(30)).await?;
//! println!("Generated:\n{}", text);
//! # Ok(()) }
//! ```

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::default_config::DEFAULT_TIMEOUT_SECS;
use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::make_snippet;

/// Errors produced by [`OllamaService`].
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The provider in the config is not Ollama.
    #[error("[AI LLM Service] invalid provider: expected Ollama, got {0:?}")]
    InvalidProvider(LlmProvider),

    /// Invalid endpoint (empty or missing http/https).
    #[error("[AI LLM Service] invalid Ollama endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("[AI LLM Service] transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[AI LLM Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Optional short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("[AI LLM Service] failed to decode response: {0}")]
    Decode(String),
}

/// Result alias for Ollama operations.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with
/// a configurable timeout.
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`OllamaError::InvalidProvider`] if `cfg.provider` is not `Ollama`
    /// - [`OllamaError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`OllamaError::Transport`] if HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        #[allow(unreachable_patterns)]
        match cfg.provider {
            LlmProvider::Ollama => {}
            other => return Err(OllamaError::InvalidProvider(other)),
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(OllamaError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let url_generate = format!("{}/api/generate", endpoint.trim_end_matches('/'));

        Ok(Self {
            client,
            cfg,
            url_generate,
        })
    }

    /// The config this client was built from.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Asks Ollama to load the model into memory.
    ///
    /// A generate request without a prompt only loads the model and returns
    /// `done = true`; this moves the expensive part out of the first real call.
    ///
    /// # Errors
    /// Same as [`OllamaService::generate`].
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn load_model(&self) -> Result<()> {
        let body = LoadRequest {
            model: &self.cfg.model,
        };

        debug!("POST {} (load)", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;
        let resp = self.ensure_success(resp).await?;

        let out: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::Decode(format!("serde error: {e}")))?;
        info!(done = out.done, "model loaded");
        Ok(())
    }

    /// Performs a **non-streaming** raw generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`        ← `self.cfg.model`
    /// - `prompt`       ← argument
    /// - `num_predict`  ← `max_tokens`, else `self.cfg.max_tokens`
    /// - `temperature`  ← `self.cfg.temperature`
    /// - `top_p`        ← `self.cfg.top_p`
    ///
    /// Returns only the continuation, without the prompt.
    ///
    /// # Errors
    /// - [`OllamaError::HttpStatus`] for non-2xx responses
    /// - [`OllamaError::Transport`] for client errors
    /// - [`OllamaError::Decode`] if response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model, prompt_chars = prompt.chars().count()))]
    pub async fn generate(&self, prompt: &str, max_tokens: Option<u32>) -> Result<String> {
        let body = GenerateRequest::from_cfg(&self.cfg, prompt, max_tokens);

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;
        let resp = self.ensure_success(resp).await?;

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            OllamaError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        debug!(
            eval_count = out.eval_count.unwrap_or_default(),
            "generation finished"
        );
        Ok(out.response)
    }

    async fn ensure_success(&self, resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Err(OllamaError::HttpStatus {
            status,
            url: self.url_generate.clone(),
            snippet: make_snippet(&text),
        })
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming, raw).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    raw: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

impl<'a> GenerateRequest<'a> {
    /// Builds a request from config, prompt, and an optional per-call token cap.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, max_tokens: Option<u32>) -> Self {
        let options = GenerateOptions {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            num_predict: max_tokens.or(cfg.max_tokens),
        };

        Self {
            model: &cfg.model,
            prompt,
            stream: false,
            raw: true,
            options: Some(options),
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Request body that only loads the model.
#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    model: &'a str,
}

/// Response body for `/api/generate`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    eval_count: Option<u32>,
}
