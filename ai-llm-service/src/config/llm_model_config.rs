use crate::config::llm_provider::LlmProvider;

/// Configuration for the fallback generation model.
///
/// # Fields
///
/// - `provider`: which backend serves the model.
/// - `model`: model identifier (e.g., `"gpt2"`, `"llama3.2:1b"`).
/// - `endpoint`: base URL of the inference server.
/// - `max_tokens`: default cap on generated tokens when a call does not set one.
/// - `temperature` / `top_p`: sampling knobs forwarded as-is.
/// - `timeout_secs`: HTTP request timeout.
/// - `max_prompt_chars`: prompt length limit applied before sending.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Ollama,
///     model: "gpt2".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     max_tokens: Some(30),
///     temperature: None,
///     top_p: None,
///     timeout_secs: Some(60),
///     max_prompt_chars: 1024,
/// };
/// assert_eq!(cfg.max_tokens, Some(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Inference endpoint (base URL, no trailing path).
    pub endpoint: String,

    /// Default maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Longest prompt (in chars) the backend is sent.
    pub max_prompt_chars: usize,
}
