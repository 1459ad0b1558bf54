use ai_llm_service::health_service::HealthStatus;
use serde::Serialize;

/// Payload for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Records in the loaded corpus.
    pub corpus_records: usize,
    /// Active keyword triggers.
    pub keyword_overrides: usize,
    /// Whether the generator has been constructed (first fallback happened).
    pub generator_loaded: bool,
    /// Backend probe; `None` when no generator backend is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<HealthStatus>,
}
