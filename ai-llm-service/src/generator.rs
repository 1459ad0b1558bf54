//! Construct-once fallback generator.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, pass clones to dependents.
//! - The underlying client is built (and the model loaded) on the first call;
//!   every later call reuses that instance. A failed build is not cached.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::config::default_config::config_ollama_generator;
//! use ai_llm_service::generator::{GenerateParams, LazyGenerator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Arc::new(LazyGenerator::new(config_ollama_generator()?));
//! let text = generator
//!     .generate("What is a firewall?", GenerateParams::default())
//!     .await?;
//! println!("{text}");
//! # Ok(()) }
//! ```

use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use crate::{
    config::{
        default_config::DEFAULT_TIMEOUT_SECS, llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::{AiLlmError, OllamaError, Result},
    services::ollama_service::OllamaService,
};

/// Per-call generation knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateParams {
    /// Cap on **new** tokens (Ollama `num_predict`); `None` uses the model config.
    ///
    /// The prompt is not counted. With `return_full_text` the returned string
    /// is the prompt plus up to this many tokens, so it can be longer than a
    /// whole-sequence cap of the same size. The prompt itself is bounded by
    /// `max_prompt_chars` instead.
    pub max_tokens: Option<u32>,
    /// Cut an over-long prompt to the model limit instead of failing.
    pub truncate_prompt: bool,
    /// Return `prompt + continuation` instead of only the continuation.
    pub return_full_text: bool,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            max_tokens: None,
            truncate_prompt: true,
            return_full_text: true,
        }
    }
}

/// Shared handle to the single generator instance of the process.
pub struct LazyGenerator {
    cfg: LlmModelConfig,
    instance: OnceCell<OllamaService>,
}

impl LazyGenerator {
    /// Wraps a config; nothing is built until the first call.
    pub fn new(cfg: LlmModelConfig) -> Self {
        Self {
            cfg,
            instance: OnceCell::new(),
        }
    }

    /// The model config.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// `true` once the instance has been built successfully.
    pub fn is_loaded(&self) -> bool {
        self.instance.initialized()
    }

    /// Returns the shared instance, building it on first use.
    ///
    /// Concurrent first callers wait on the same initialization.
    ///
    /// # Errors
    /// Client construction or model loading failures. The cell stays empty
    /// in that case, so the next call retries.
    pub async fn instance(&self) -> Result<&OllamaService> {
        self.instance
            .get_or_try_init(|| async {
                #[allow(unreachable_patterns)]
                let svc = match self.cfg.provider {
                    LlmProvider::Ollama => OllamaService::new(self.cfg.clone())?,
                };
                svc.load_model().await.map_err(|e| self.classify(e))?;
                info!(
                    model = %self.cfg.model,
                    endpoint = %self.cfg.endpoint,
                    "generator instance ready"
                );
                Ok::<_, AiLlmError>(svc)
            })
            .await
    }

    /// Generates a continuation for `prompt`.
    ///
    /// # Errors
    /// - [`AiLlmError::PromptTooLong`] when the prompt exceeds
    ///   `max_prompt_chars` and `truncate_prompt` is off
    /// - any construction or HTTP error from the Ollama client
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, params: GenerateParams) -> Result<String> {
        let prompt = fit_prompt(prompt, self.cfg.max_prompt_chars, params.truncate_prompt)?;
        let svc = self.instance().await?;
        let continuation = svc
            .generate(prompt, params.max_tokens)
            .await
            .map_err(|e| self.classify(e))?;

        if params.return_full_text {
            Ok(format!("{prompt}{continuation}"))
        } else {
            Ok(continuation)
        }
    }

    /// Client timeouts become [`AiLlmError::Timeout`] with the configured limit.
    fn classify(&self, err: OllamaError) -> AiLlmError {
        match err {
            OllamaError::Transport(e) if e.is_timeout() => {
                let secs = self.cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
                warn!(timeout_secs = secs, "generator request timed out");
                AiLlmError::Timeout(Duration::from_secs(secs))
            }
            other => AiLlmError::Ollama(other),
        }
    }
}

/// Applies the prompt limit: cut on a char boundary or reject.
fn fit_prompt(prompt: &str, max_chars: usize, truncate: bool) -> Result<&str> {
    let len = prompt.chars().count();
    if len <= max_chars {
        return Ok(prompt);
    }
    if !truncate {
        return Err(AiLlmError::PromptTooLong {
            len,
            max: max_chars,
        });
    }
    warn!(len, max_chars, "prompt truncated to model limit");
    let cut = prompt
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(prompt.len());
    Ok(&prompt[..cut])
}
