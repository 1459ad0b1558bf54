use std::path::PathBuf;
use std::sync::Arc;

use ai_llm_service::{LazyGenerator, health_service::HealthService};
use faq_base::ResponseSelector;

use crate::error_handler::AppError;
use crate::routes::chat_page::page::ChatPage;

/// Default listen address.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8501";

/// Default corpus file, relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "faq.jsonl";

/// Process-level settings for the HTTP shell.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Socket address to bind, e.g. "127.0.0.1:8501".
    pub address: String,
    /// JSONL corpus of instruction/response pairs.
    pub corpus_path: PathBuf,
}

impl ApiSettings {
    /// Load settings from `API_ADDRESS` and `FAQ_CORPUS_PATH`, with defaults.
    pub fn from_env() -> Self {
        Self {
            address: env_or("API_ADDRESS", DEFAULT_API_ADDRESS),
            corpus_path: PathBuf::from(env_or("FAQ_CORPUS_PATH", DEFAULT_CORPUS_PATH)),
        }
    }
}

fn env_or(key: &str, dflt: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

/// Generator handle plus the probe used by `/health`.
pub struct GeneratorProbe {
    pub generator: Arc<LazyGenerator>,
    pub health: HealthService,
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Read-only selector built at startup.
    pub selector: ResponseSelector,
    /// Compiled HTML page.
    pub chat_page: ChatPage,
    /// Absent when the selector runs with a generator that has no backend to probe.
    pub generator_probe: Option<GeneratorProbe>,
}

impl AppState {
    /// # Errors
    /// [`AppError::Template`] if the page template does not compile.
    pub fn new(selector: ResponseSelector) -> Result<Self, AppError> {
        Ok(Self {
            selector,
            chat_page: ChatPage::new()?,
            generator_probe: None,
        })
    }

    pub fn with_generator_probe(mut self, generator: Arc<LazyGenerator>, health: HealthService) -> Self {
        self.generator_probe = Some(GeneratorProbe { generator, health });
        self
    }
}
